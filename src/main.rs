use anyhow::Result;
use butterfly_partition::bisection::BisectionConfig;
use butterfly_partition::cli::{run_generate_grid, run_partition, Cli, Commands};
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Partition {
            graph,
            mapping,
            output,
            border_geojson,
            max_cell_size,
            balance,
            boundary_factor,
            optimizing_cuts,
            threads,
        } => {
            let config = BisectionConfig {
                maximum_cell_size: max_cell_size,
                balance,
                boundary_factor,
                num_optimizing_cuts: optimizing_cuts,
            };
            run_partition(graph, mapping, output, border_geojson, config, threads)
        }
        Commands::GenerateGrid { rows, cols, output } => {
            run_generate_grid(rows, cols, output)
        }
    }
}
