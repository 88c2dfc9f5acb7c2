#![allow(clippy::collapsible_else_if)]

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use clap::Parser;

use otter_step::{server, types::err};

mod args;

use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let (config, server_config) = Args::parse().configs();

    match server::serve(config, server_config).await {
        Ok(()) => {}

        Err(err::ServerError::Session(err::ErrorKind::ImmediateUnsat)) => {
            log::error!("The formula is unsatisfiable without search");
            println!("s UNSATISFIABLE");
            std::process::exit(20);
        }

        Err(e) => {
            println!("c Error: {e}");
            std::process::exit(1);
        }
    }
}
