use crate::cli::EvaluateArgs;
use crate::error::Result;
use harmonic_barrier::core::forcefield::term::EvaluationSummary;
use harmonic_barrier::core::io::particles::{self as particle_io, ParticleIoError};
use harmonic_barrier::engine::field::HarmonicBarrierField;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

pub fn run(args: EvaluateArgs) -> Result<()> {
    info!("Loading barrier definition from {:?}", &args.config);
    let field = HarmonicBarrierField::load(&args.config)?;

    info!("Loading particle snapshot from {:?}", &args.particles);
    let particles = particle_io::read_particles(&args.particles)?;

    let contributions = field.evaluate(args.step, &particles)?;
    info!(
        "Evaluated {} particles at step {}.",
        contributions.len(),
        args.step
    );

    match &args.output {
        Some(path) => {
            info!("Writing contribution report to {:?}", path);
            let file = File::create(path).map_err(|e| ParticleIoError::Io {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            particle_io::write_contributions(BufWriter::new(file), &particles, &contributions)?;
        }
        None => {
            particle_io::write_contributions(io::stdout().lock(), &particles, &contributions)?;
        }
    }

    if args.summary {
        let summary = EvaluationSummary::from_contributions(&contributions);
        print_summary(&mut io::stderr().lock(), args.step, &summary)?;
    }

    Ok(())
}

fn print_summary<W: Write>(out: &mut W, step: u64, summary: &EvaluationSummary) -> io::Result<()> {
    writeln!(out, "step:          {}", step)?;
    writeln!(out, "interacting:   {}", summary.interacting)?;
    writeln!(out, "total energy:  {:.6}", summary.total_energy)?;
    writeln!(
        out,
        "net force:     ({:.6}, {:.6}, {:.6})",
        summary.net_force.x, summary.net_force.y, summary.net_force.z
    )?;
    writeln!(out, "virial trace:  {:.6}", summary.virial.trace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonic_barrier::engine::error::BarrierError;
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
        [geometry]
        type = "planar"

        [interface]
        type = "constant"
        value = 5.0

        [params.A]
        k = 50.0
        offset = 0.1

        [params.B]
        k = 200.0
        offset = -0.1
    "#;

    const PARTICLES: &str = "type,x,y,z\nA,1,1,4.6\nB,-1,1,5.4\nA,1,-1,5.6\nA,-1,-1,6.6\n";

    #[test]
    fn run_writes_report_to_output_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("barrier.toml");
        let snapshot = dir.path().join("particles.csv");
        let output = dir.path().join("report.csv");
        fs::write(&config, CONFIG).unwrap();
        fs::write(&snapshot, PARTICLES).unwrap();

        run(EvaluateArgs {
            config,
            particles: snapshot,
            step: 0,
            output: Some(output.clone()),
            summary: false,
        })
        .unwrap();

        let report = fs::read_to_string(output).unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "0,A,0.0,0.0,0.0,0.0,0.0");
        let last: Vec<f64> = lines[4]
            .split(',')
            .skip(2)
            .map(|field| field.parse().unwrap())
            .collect();
        assert_eq!(last[0].abs(), 0.0);
        assert_eq!(last[1].abs(), 0.0);
        assert!((last[2] + 75.0).abs() < 1e-9);
        assert!((last[3] - 56.25).abs() < 1e-9);
    }

    #[test]
    fn run_reports_missing_config_as_barrier_error() {
        let dir = tempdir().unwrap();
        let snapshot = dir.path().join("particles.csv");
        fs::write(&snapshot, PARTICLES).unwrap();

        let result = run(EvaluateArgs {
            config: dir.path().join("missing.toml"),
            particles: snapshot,
            step: 0,
            output: None,
            summary: false,
        });
        assert!(matches!(
            result,
            Err(crate::error::CliError::Barrier(BarrierError::Config(_)))
        ));
    }

    #[test]
    fn run_fails_for_unparameterized_type() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("barrier.toml");
        let snapshot = dir.path().join("particles.csv");
        fs::write(&config, CONFIG).unwrap();
        fs::write(&snapshot, "type,x,y,z\nC,0,0,0\n").unwrap();

        let result = run(EvaluateArgs {
            config,
            particles: snapshot,
            step: 0,
            output: Some(dir.path().join("report.csv")),
            summary: false,
        });
        assert!(matches!(result, Err(crate::error::CliError::Barrier(_))));
    }

    #[test]
    fn print_summary_formats_totals() {
        let summary = EvaluationSummary::from_contributions(&[]);
        let mut buffer = Vec::new();
        print_summary(&mut buffer, 7, &summary).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("step:          7"));
        assert!(text.contains("interacting:   0"));
        assert!(text.contains("total energy:  0.000000"));
    }
}
