use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::remote::HttpRemote;
use rsvp_core::settings::RsvpConfig;

pub fn run(config_path: &Path, endpoint: Option<String>) -> Result<()> {
    let mut config = RsvpConfig::load(Some(config_path))?;

    if let Some(endpoint) = endpoint {
        // Reject URLs the remote couldn't use before saving them
        HttpRemote::new(&endpoint, config.request_timeout())?;
        config.endpoint = Some(endpoint);
        config.save(config_path)?;
        println!("{} Endpoint saved\n", "✓".green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Cache:     {}", config.cache_path().display());
    println!();
    println!("{}", "Remote".bold());
    match config.endpoint() {
        Ok(endpoint) => println!("  Endpoint:  {endpoint}"),
        Err(_) => println!("  Endpoint:  {}", "not set".dimmed()),
    }

    Ok(())
}
