//! Example listening for a Muse OSC stream and printing connection changes, gestures and
//! battery status.

use std::{env, net::IpAddr, process};

use tokio::{signal, sync::broadcast::error::RecvError};

use muse_osc::{
    error::Result,
    event::MuseEvent,
    live::{MuseOscConfig, MuseOscEngine},
};

/// Prints usage information and exits.
fn print_usage() -> ! {
    eprintln!("Usage: cargo run --example muse_monitor -- [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --address <IP>      Local address to bind (default: 127.0.0.1)");
    eprintln!("  --port <PORT>       Local UDP port to bind (default: 7000)");
    eprintln!("  --prefix <PREFIX>   Only accept addresses under this prefix (default: none)");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for verbose output.");
    process::exit(1);
}

fn parse_config() -> MuseOscConfig {
    let mut config = MuseOscConfig::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        let Some(value) = args.next() else {
            print_usage();
        };

        config = match arg.as_str() {
            "--address" => match value.parse::<IpAddr>() {
                Ok(address) => config.with_bind_address(address),
                Err(_) => print_usage(),
            },
            "--port" => match value.parse::<u16>() {
                Ok(port) => config.with_port(port),
                Err(_) => print_usage(),
            },
            "--prefix" => config.with_prefix(value),
            _ => print_usage(),
        };
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_config();

    println!(
        "Listening for Muse OSC messages on {} (prefix: {:?})...",
        config.socket_addr(),
        config.prefix()
    );

    let engine = MuseOscEngine::new(config)?;
    let mut events = engine.update_receiver();
    let controller = engine.start();

    loop {
        tokio::select! {
            event_res = events.recv() => {
                match event_res {
                    Ok(event) => match event {
                        MuseEvent::Open
                        | MuseEvent::Connect
                        | MuseEvent::Disconnect
                        | MuseEvent::Blink
                        | MuseEvent::JawClench
                        | MuseEvent::ContactMade
                        | MuseEvent::ContactLost => println!("{event}"),
                        MuseEvent::BatteryStatus(battery) => {
                            if let Some(percent) = battery.percent {
                                println!("battery: {:.1}%", percent * 100.0);
                            }
                        }
                        _ => {}
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        eprintln!("Monitor lagged, skipped {skipped} events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            status = controller.until_stopped() => {
                eprintln!("Process stopped: {status}");
                return Ok(());
            }
            _ = signal::ctrl_c() => break,
        }
    }

    controller.stop().await?;

    println!("Stopped.");

    Ok(())
}
