use std::io;
use std::net::IpAddr;

use minfraud::{
    Account, Auth, Device, Email, Event, EventType, MinFraudClient, Order, Request,
    ShoppingCartItem,
};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let account_id = std::env::var("MINFRAUD_ACCOUNT_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MINFRAUD_ACCOUNT_ID environment variable is required",
        )
    })?;
    let license_key = std::env::var("MINFRAUD_LICENSE_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MINFRAUD_LICENSE_KEY environment variable is required",
        )
    })?;
    let address = std::env::var("MINFRAUD_EMAIL").unwrap_or_else(|_| "test@maxmind.com".to_owned());
    let ip: IpAddr = std::env::var("MINFRAUD_IP")
        .unwrap_or_else(|_| "81.2.69.160".to_owned())
        .parse()?;

    let request = Request::builder()
        .device(Device::builder(ip).build())
        .account(Account::builder().user_id("demo-user").build())
        .email(Email::builder().address(address)?.hash_address().build())
        .event(
            Event::builder()
                .transaction_id("demo-txn")
                .time(chrono::Utc::now())?
                .event_type(EventType::Purchase)
                .build(),
        )
        .order(Order::builder().amount(Decimal::new(1999, 2)).currency("USD").build())
        .add_shopping_cart_item(ShoppingCartItem::builder().item_id("sku-1").quantity(1).build())
        .build();

    println!("request: {}", request.to_json()?);

    let client = MinFraudClient::new(Auth::new(account_id, license_key)?);
    let body = client.score(&request).await?;
    println!("response: {body}");

    Ok(())
}
