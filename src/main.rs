use std::{
    fs::File,
    io::{self, BufWriter, Write},
    process,
    time::Instant,
};

use log::info;

use seriate::{CliOptions, DistanceMatrix, Result, Seriator, input};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = match CliOptions::from_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    if options.help {
        print!("{}", CliOptions::usage());
        return Ok(());
    }
    seriate::logging::init_logger(&options)?;

    let dists = input::read_distances(&options.input)?;
    info!("input: shape={:?}", dists.shape());
    info!("options: {options}");

    let seriator = Seriator::initialize(&options.seriate)?;
    info!("solver: {}", seriator.capability());

    let order = seriator.seriate(dists.view())?;
    write_order(&options.output, &order)?;

    let cost = DistanceMatrix::new(dists.view())?.path_cost(&order);
    info!(
        "output: n={} cost={cost:.4} time={:.2}s",
        order.len(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

fn write_order(path: &str, order: &[usize]) -> io::Result<()> {
    let mut out: Box<dyn Write> = if path.is_empty() {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        Box::new(BufWriter::new(File::create(path)?))
    };
    for index in order {
        writeln!(out, "{index}")?;
    }
    out.flush()
}
