use std::path::PathBuf;

use clap::Parser;

use rust_orrery::model::Catalog;

/// Prints the orbital characteristics of the bodies in a catalog.
#[derive(Debug, Parser)]
struct Args {
    /// Only print this body.
    name: Option<String>,

    /// RON body catalog; the built-in solar system if omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => match Catalog::read_file(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
        None => Catalog::solar_system(),
    };

    let mut found = false;
    for body in catalog.bodies() {
        if let Some(ref name) = args.name {
            if body.id.as_str().to_lowercase() != name.to_lowercase() {
                continue;
            }
        }
        found = true;

        println!("Characteristics for {}", body.id);
        println!("- Radius: {}", body.radius);
        println!("- Orbit radius: {}", body.distance);
        println!("- Angular speed: {}", body.angular_speed);
        match body.period() {
            Some(period) => println!("- Orbital period: {:.2}", period),
            None => println!("- Orbital period: N/A (central body)"),
        }
        println!();
    }

    if !found {
        eprintln!("No body named {:?}", args.name.unwrap_or_default());
        std::process::exit(1);
    }
}
