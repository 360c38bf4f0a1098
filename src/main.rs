use std::process;

use log::{error, info};

use hash_chain::{Blockchain, ChainConfig};

fn main() {
    env_logger::init();

    let config = match ChainConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(2);
        }
    };

    let mut blockchain = Blockchain::with_config(config);
    for payload in ["Send 50 DOGE to Andy", "Send 10 more DOGE to Andy"] {
        if let Err(e) = blockchain.append(payload) {
            error!("Failed to append {:?}: {}", payload, e);
            process::exit(1);
        }
    }

    for block in &blockchain {
        println!("{}", block);
        println!();
    }

    match blockchain.verify() {
        Ok(()) => info!("Chain of {} blocks verified", blockchain.len()),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
