//! Builds the reference spherical tokamak with a lower divertor on the voxel
//! kernel and prints every part with its sampled volume.
//!
//! Usage:
//! ```text
//! cargo run --example spherical_tokamak
//! RUST_LOG=tokamak_layers=debug cargo run --example spherical_tokamak
//! ```

use tokamak_layers::assembly::{Color, ColorTable};
use tokamak_layers::build::{Build, BuildEntry};
use tokamak_layers::kernel::{GridSpec, VoxelKernel};
use tokamak_layers::math::Point3;
use tokamak_layers::reactor::Reactor;
use tokamak_layers::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for the demo and library.
    // Override with RUST_LOG env var (e.g. RUST_LOG=tokamak_layers=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("spherical_tokamak=info".parse().unwrap_or_default())
        .add_directive("tokamak_layers=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let radial = Build::new([
        BuildEntry::gap(10.0),
        BuildEntry::solid(50.0),
        BuildEntry::solid(15.0),
        BuildEntry::gap(50.0),
        BuildEntry::plasma(300.0),
        BuildEntry::gap(60.0),
        BuildEntry::solid(15.0),
        BuildEntry::solid(60.0),
        BuildEntry::solid(10.0),
    ])?;

    let mut kernel = VoxelKernel::new(GridSpec::new(
        Point3::new(-600.0, -600.0, -480.0),
        Point3::new(600.0, 600.0, 480.0),
        10.0,
    )?);
    let divertor = kernel.make_box(
        Point3::new(-600.0, -600.0, -480.0),
        Point3::new(600.0, 600.0, -360.0),
    )?;

    let colors = ColorTable::new()
        .with("plasma", Color::rgba(1.0, 0.7, 0.8, 0.6)?)
        .with("extra_intersect_shapes_1", Color::rgb(0.9, 0.2, 0.2)?);

    let assembly = Reactor::spherical_from_plasma(radial, 2.0)?
        .with_rotation_angle(180.0)
        .with_extra_intersect_shapes(vec![divertor])
        .with_colors(colors)
        .execute(&mut kernel)?;

    let params = assembly.parameters();
    tracing::info!(
        major_radius = params.major_radius,
        minor_radius = params.minor_radius,
        elongation = params.elongation,
        triangularity = params.triangularity,
        "reactor built"
    );
    for part in assembly.parts() {
        let volume = kernel.volume(part.shape)?;
        println!(
            "{:<28} {:>14.0} cm^3  rgba({:.2}, {:.2}, {:.2}, {:.2})",
            part.name, volume, part.color.r, part.color.g, part.color.b, part.color.a
        );
    }
    Ok(())
}
