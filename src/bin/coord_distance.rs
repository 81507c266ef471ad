//! Coordinate distance tool
//!
//! Computes the Euclidean distance and tolerance-based equality of two
//! locations given in Cartesian or spheric form.
//!
//! Usage:
//!   cargo run --bin coord_distance -- cartesian:45,60,50 cartesian:20.5,20.4,20.3
//!   cargo run --bin coord_distance -- spheric:20,40.5 spheric:12.6,-120,6371 --json

use clap::{ArgAction, Parser};
use geolocus::{metric, CoordinateRef, CoordinateRegistry, KeyStrategy, RegistryConfig};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// A location as written on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
enum LocationArg {
    Cartesian { x: f64, y: f64, z: f64 },
    Spheric { latitude: f64, longitude: f64, radius: Option<f64> },
}

/// Coordinate distance tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Distance and equality between two Cartesian or spheric locations",
    long_about = None
)]
struct Args {
    /// First location, `cartesian:X,Y,Z` or `spheric:LAT,LON[,RADIUS]`
    #[arg(value_parser = parse_location)]
    from: LocationArg,

    /// Second location, same format as the first
    #[arg(value_parser = parse_location)]
    to: LocationArg,

    /// Print the result as JSON
    #[arg(short, long, action = ArgAction::SetTrue)]
    json: bool,

    /// Intern on a fixed grid instead of by tolerance
    #[arg(long, action = ArgAction::SetTrue)]
    grid: bool,
}

/// Parse `cartesian:X,Y,Z` / `spheric:LAT,LON[,RADIUS]` (or `c:` / `s:`)
fn parse_location(input: &str) -> std::result::Result<LocationArg, String> {
    let (kind, values) = input
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:VALUES, got '{}'", input))?;

    let numbers = values
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid number '{}': {}", v, e))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    match (kind, numbers.as_slice()) {
        ("cartesian" | "c", [x, y, z]) => Ok(LocationArg::Cartesian {
            x: *x,
            y: *y,
            z: *z,
        }),
        ("spheric" | "s", [latitude, longitude]) => Ok(LocationArg::Spheric {
            latitude: *latitude,
            longitude: *longitude,
            radius: None,
        }),
        ("spheric" | "s", [latitude, longitude, radius]) => Ok(LocationArg::Spheric {
            latitude: *latitude,
            longitude: *longitude,
            radius: Some(*radius),
        }),
        ("cartesian" | "c", _) => Err(format!("cartesian needs 3 values, got {}", numbers.len())),
        ("spheric" | "s", _) => Err(format!("spheric needs 2 or 3 values, got {}", numbers.len())),
        (other, _) => Err(format!("unknown coordinate kind '{}'", other)),
    }
}

/// Resolve a command line location through the registry
fn acquire(registry: &CoordinateRegistry, location: LocationArg) -> Result<CoordinateRef> {
    let coord = match location {
        LocationArg::Cartesian { x, y, z } => registry.cartesian_instance(x, y, z)?,
        LocationArg::Spheric {
            latitude,
            longitude,
            radius: Some(radius),
        } => registry.spheric_instance(latitude, longitude, radius)?,
        LocationArg::Spheric {
            latitude,
            longitude,
            radius: None,
        } => registry.spheric_instance_on_earth(latitude, longitude)?,
    };
    Ok(coord)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let strategy = if args.grid {
        KeyStrategy::Grid
    } else {
        KeyStrategy::Tolerance
    };
    let registry = CoordinateRegistry::with_config(RegistryConfig::new().with_key_strategy(strategy))?;

    let from = acquire(&registry, args.from)?;
    let to = acquire(&registry, args.to)?;

    let distance = metric::distance(Some(&*from), Some(&*to))?;
    let equal = metric::is_equal(Some(&*from), Some(&*to))?;
    let (dx, dy, dz) = metric::axis_distances(Some(&*from), Some(&*to))?;

    if args.json {
        let report = serde_json::json!({
            "from": *from,
            "to": *to,
            "axis_distances": [dx, dy, dz],
            "distance": distance,
            "equal": equal,
            "registry": registry.stats(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("From:           {}", from);
        println!("To:             {}", to);
        println!("Axis distances: {:.6}, {:.6}, {:.6}", dx, dy, dz);
        println!("Distance:       {:.6}", distance);
        println!("Equal:          {}", equal);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            parse_location("cartesian:45,60,50").unwrap(),
            LocationArg::Cartesian {
                x: 45.0,
                y: 60.0,
                z: 50.0
            }
        );
        assert_eq!(
            parse_location("s: 20, 40.5").unwrap(),
            LocationArg::Spheric {
                latitude: 20.0,
                longitude: 40.5,
                radius: None
            }
        );
        assert_eq!(
            parse_location("spheric:0,0,1").unwrap(),
            LocationArg::Spheric {
                latitude: 0.0,
                longitude: 0.0,
                radius: Some(1.0)
            }
        );

        assert!(parse_location("45,60,50").is_err());
        assert!(parse_location("cartesian:1,2").is_err());
        assert!(parse_location("spheric:1").is_err());
        assert!(parse_location("polar:1,2").is_err());
        assert!(parse_location("c:1,x,2").is_err());
    }

    #[test]
    fn test_acquire_defaults_to_earth_radius() {
        let registry = CoordinateRegistry::new();
        let coord = acquire(
            &registry,
            LocationArg::Spheric {
                latitude: 10.0,
                longitude: 20.0,
                radius: None,
            },
        )
        .unwrap();

        use geolocus::CoordinateSystem;
        assert_eq!(coord.as_spheric().unwrap().radius(), 6371.0);
    }
}
