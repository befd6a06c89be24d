//! The building process.
//!
//! This script does two steps when building `reptime`.
//! 1. The critical-value tables for Student's t distribution and the
//!    standard normal distribution are generated into
//!    `[OUT_DIR]/critical_values.rs`, where `reptime_lib::critical`
//!    includes them as static data.
//! 2. The shell completions are compiled and placed in
//!    `[target_dir]/completions/`.

#![allow(unused)]
#![allow(clippy::missing_docs_in_private_items)]

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate_to;
use clap_complete::shells::Bash;
use clap_complete::shells::Fish;
use clap_complete::shells::PowerShell;
use clap_complete::shells::Zsh;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;
use statrs::distribution::StudentsT;

include!("src/reptime/cli/def.rs");

/// Degrees of freedom covered by the t table; larger samples use Z values.
const MAX_DF: usize = 29;

fn main() -> Result<()> {
    let outdir: PathBuf = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    }
    .into();

    generate_critical_values(&outdir.join("critical_values.rs"))?;

    let target_dir = outdir.parent().unwrap().parent().unwrap().parent().unwrap();

    let completions = target_dir.join("completions/");
    let _ = fs::create_dir(&completions);

    let mut completions_command = Cli::command();

    generate_to(Bash, &mut completions_command, "reptime", &completions)?;
    generate_to(Fish, &mut completions_command, "reptime", &completions)?;
    generate_to(PowerShell, &mut completions_command, "reptime", &completions)?;
    generate_to(Zsh, &mut completions_command, "reptime", &completions)?;

    Ok(())
}

/// Emit `T_CRITICAL` and `Z_CRITICAL` as static arrays.
///
/// Row `level - 1` holds the two-tailed critical values for a confidence
/// level of `level` percent. Column `df - 1` of the t table covers
/// `df` degrees of freedom for `df` in `1..=MAX_DF`.
fn generate_critical_values(path: &Path) -> Result<()> {
    let normal = Normal::new(0.0, 1.0).context("Could not construct the standard normal")?;

    let mut out = String::new();

    writeln!(
        out,
        "/// Two-tailed Student's t critical values, `[level - 1][df - 1]`."
    )?;
    writeln!(out, "pub static T_CRITICAL: [[f64; {MAX_DF}]; 99] = [")?;
    for level in 1..=99u32 {
        let tail = two_tailed_quantile(level);
        write!(out, "    [")?;
        for df in 1..=MAX_DF {
            let t = StudentsT::new(0.0, 1.0, df as f64)
                .context("Could not construct the t distribution")?;
            write!(out, "{:?}, ", t.inverse_cdf(tail))?;
        }
        writeln!(out, "],")?;
    }
    writeln!(out, "];")?;

    writeln!(out)?;
    writeln!(out, "/// Two-tailed Z critical values, `[level - 1]`.")?;
    writeln!(out, "pub static Z_CRITICAL: [f64; 99] = [")?;
    for level in 1..=99u32 {
        writeln!(
            out,
            "    {:?},",
            normal.inverse_cdf(two_tailed_quantile(level))
        )?;
    }
    writeln!(out, "];")?;

    fs::write(path, out).with_context(|| format!("Could not write the tables to {path:?}"))?;

    Ok(())
}

/// The upper quantile whose two-tailed coverage is `level` percent.
fn two_tailed_quantile(level: u32) -> f64 {
    1.0 - (1.0 - f64::from(level) / 100.0) / 2.0
}
