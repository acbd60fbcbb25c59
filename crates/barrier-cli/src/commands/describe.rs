use crate::cli::DescribeArgs;
use crate::error::Result;
use harmonic_barrier::core::geometry::barrier::BarrierGeometry;
use harmonic_barrier::engine::config::BarrierConfig;
use harmonic_barrier::engine::field::HarmonicBarrierField;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: DescribeArgs) -> Result<()> {
    info!("Loading barrier definition from {:?}", &args.config);
    let config = BarrierConfig::load(&args.config)?;
    let schedule_name = config.interface.name();
    let field = HarmonicBarrierField::from_config(config)?;

    describe(&mut io::stdout().lock(), &field, schedule_name, &args.steps)?;
    Ok(())
}

fn geometry_label(geometry: BarrierGeometry) -> String {
    match geometry {
        BarrierGeometry::Spherical => "spherical (origin)".to_string(),
        BarrierGeometry::Planar { axis } => format!("planar (normal +{})", axis),
        BarrierGeometry::Cylindrical { axis } => format!("cylindrical (axis {})", axis),
    }
}

fn describe<W: Write>(
    out: &mut W,
    field: &HarmonicBarrierField,
    schedule_name: &str,
    steps: &[u64],
) -> io::Result<()> {
    let interface = field.interface();
    writeln!(out, "geometry:   {}", geometry_label(field.geometry()))?;
    writeln!(
        out,
        "interface:  {} in [{}, {}]",
        schedule_name,
        interface.lower_bound(),
        interface.upper_bound()
    )?;

    let mut types: Vec<_> = field.params().iter().collect();
    types.sort_unstable_by(|a, b| a.0.cmp(b.0));
    writeln!(out, "types:")?;
    for (name, params) in types {
        if params.is_disabled() {
            writeln!(out, "  {:<8} disabled (k = 0)", name)?;
        } else if let Some((lower, upper)) = field.boundary_range(name) {
            writeln!(
                out,
                "  {:<8} k = {:<10} offset = {:<8} boundary in [{}, {}]",
                name,
                params.k(),
                params.offset(),
                lower,
                upper
            )?;
        }
    }
    if let Some(extent) = field.max_boundary_extent() {
        writeln!(out, "max extent: {}", extent)?;
    }

    if !steps.is_empty() {
        writeln!(out, "schedule:")?;
        for &step in steps {
            writeln!(out, "  step {:<10} R = {}", step, field.interface_value(step))?;
        }
    }
    Ok(())
}
