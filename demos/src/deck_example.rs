use dotenv::dotenv;
use std::env;
use swipedeck::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let deck = SwipeDeck::from_env()?;
    let ctx = deck.context();
    let mut pipeline = deck.pipeline();
    pipeline.on_state_change(|state| println!("pipeline: {:?}", state));

    let mut gate = SessionGate::new();
    if gate.enter(&ctx, &mut pipeline).await? == GateDecision::RequiresAuthentication {
        let email = env::var("SWIPEDECK_EMAIL")?;
        let password = env::var("SWIPEDECK_PASSWORD")?;

        let mut login = deck.login_flow();
        login.set_email(Some(&email));
        login.set_password(Some(&password));
        login.submit(deck.identity()).await?;

        gate.on_authenticated(&ctx, &mut pipeline).await?;
    }

    if let Some(me) = pipeline.current_user() {
        println!(
            "Looking for ages {:?}..{:?} on behalf of {}",
            me.min_seeking_age, me.max_seeking_age, me.uid
        );
    }

    for card in pipeline.candidates() {
        println!("---- {} ({} photos)", card.headline, card.image_urls.len());
        println!("{}", card.plain_text());
    }
    if let Some(last) = pipeline.last_fetched_user() {
        println!("Last card in the deck: {}", last.uid);
    }

    deck.identity().sign_out().await?;
    gate.enter(&ctx, &mut pipeline).await?;
    println!("After sign out: {:?}, {} cards", pipeline.state(), pipeline.candidates().len());

    Ok(())
}
