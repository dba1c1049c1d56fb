use dotenv::dotenv;
use log::info;
use std::env;
use swipedeck::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let email = env::var("SWIPEDECK_EMAIL")?;
    let password = env::var("SWIPEDECK_PASSWORD")?;

    let deck = SwipeDeck::from_env()?;
    let mut login = deck.login_flow();
    login.on_validity_change(|valid| println!("form valid: {}", valid));
    login.on_logging_in_change(|busy| println!("logging in: {}", busy));

    // Feed the form the way a text field would, one edit at a time
    let mut typed = String::new();
    for ch in email.chars() {
        typed.push(ch);
        login.set_email(Some(&typed));
    }
    login.set_password(Some(&password));

    if !login.can_submit() {
        println!("Form is not valid; nothing submitted");
        return Ok(());
    }

    match login.submit(deck.identity()).await {
        Ok(session) => {
            info!("session expires at {:?}", session.expires_at);
            println!("Signed in as {}", session.user_id);
            deck.identity().sign_out().await?;
            println!("Signed out");
        }
        Err(Error::Auth(message)) => println!("Login rejected: {}", message),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
