mod service;

use service::UserInterface;
use slumber::{Config, Container};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let container = Container::new(Config::new(concat!(module_path!(), "::service")))?;

    let user_service = container.get_bean("userService")?;
    println!("=========== userService ============");
    println!("{user_service:?}");

    println!("=========== userService.test() ============");
    container.get::<dyn UserInterface>("userService")?.test();

    Ok(())
}
