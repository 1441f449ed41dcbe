//! Setter/getter boilerplate shared by the request sub-object builders.

/// Chained `Option<String>` setters writing through `self.<inner>[.<nested>]`.
macro_rules! string_setters {
    ($inner:ident => $($(#[$meta:meta])* $field:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$inner.$field = Some(value.into());
                self
            }
        )+
    };
    ($inner:ident . $nested:ident => $($(#[$meta:meta])* $field:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$inner.$nested.$field = Some(value.into());
                self
            }
        )+
    };
}

macro_rules! string_getters {
    ($($field:ident),+ $(,)?) => {
        $(
            pub fn $field(&self) -> Option<&str> {
                self.$field.as_deref()
            }
        )+
    };
}
