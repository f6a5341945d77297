use clap::Parser;
use rewind_client::demo::{self, DemoConfig};
use rewind_client::{ClientError, RewindClient};

#[derive(Parser, Debug)]
#[command(
    name = "rewind-client",
    about = "Streams a demo battlefield scene to a locally running rewind viewer"
)]
struct Cli {
    /// Viewer host.
    #[arg(long, env = "REWIND_HOST", default_value = rewind_client::DEFAULT_HOST)]
    host: String,

    /// Viewer port.
    #[arg(long, env = "REWIND_PORT", default_value_t = rewind_client::DEFAULT_PORT)]
    port: u16,

    /// Seed for the demo scene generator.
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Number of simulated frames.
    #[arg(long, default_value_t = 2000)]
    steps: u32,

    /// World edge length; the terrain grid is world-size / 32 cells square.
    #[arg(long, default_value_t = 1024)]
    world_size: u32,

    /// Units drawn per frame.
    #[arg(long, default_value_t = 100)]
    units_per_step: u32,
}

fn main() -> Result<(), ClientError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut client = RewindClient::connect(&cli.host, cli.port)?;
    demo::run(
        &mut client,
        &DemoConfig {
            world_size: cli.world_size,
            steps: cli.steps,
            units_per_step: cli.units_per_step,
            seed: cli.seed,
        },
    )?;
    client.close()
}
