use hubtoken::{authorize_url, exchange_code, start_listener, Credentials, LISTEN_ADDR};

use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), hubtoken::Error> {
    // credentials are fatal before the listener binds
    let credentials = Credentials::from_env()?;
    let auth_url = authorize_url(&credentials)?;

    start_listener(LISTEN_ADDR, move |code| exchange_code(&credentials, code))?;

    pause("\nPress enter when the server is ready...\n")?;
    println!("go to this website to authenticate:");
    println!("{}", auth_url);
    pause("\nPress enter to close\n")?;

    Ok(())
}

fn pause(prompt: &str) -> io::Result<()> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(())
}
