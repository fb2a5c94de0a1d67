//! Execution statistics collection and reporting.
//!
//! This module tracks what the step engine has done. It provides:
//! 1. **Retirement:** Count of successfully executed instructions.
//! 2. **Instruction mix:** Per-opcode counts of retired instructions.
//! 3. **Memory and system:** Bytes stored, stores dropped by the `ignore` policy,
//!    and supervisor calls with an unknown service number.

use std::collections::BTreeMap;
use std::fmt;

use crate::isa::instruction::Opcode;

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"memory"`.
/// Pass an empty slice to [`SimStats::write_sections`] to write all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "memory"];

const RULE: &str = "----------------------------------------------------------";

/// Execution statistics for one engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Number of instructions that completed and advanced the program counter.
    pub instructions_retired: u64,
    /// Retired instructions by opcode.
    pub opcode_counts: BTreeMap<Opcode, u64>,
    /// Bytes written to memory by stores.
    pub bytes_stored: u64,
    /// Stores skipped because they fell outside memory under the `ignore` policy.
    pub stores_dropped: u64,
    /// Supervisor calls whose service number was not recognized.
    pub unknown_syscalls: u64,
}

impl SimStats {
    /// Records a retired instruction.
    pub fn record_retired(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        *self.opcode_counts.entry(op).or_insert(0) += 1;
    }

    /// Returns how many instructions with `op` have retired.
    pub fn count(&self, op: Opcode) -> u64 {
        self.opcode_counts.get(&op).copied().unwrap_or(0)
    }

    /// Writes only the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Unknown
    /// names are ignored; an empty slice writes every section.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the report.
    /// * `sections` - Slice of section names to write, or empty for all.
    pub fn write_sections(&self, out: &mut impl fmt::Write, sections: &[String]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            writeln!(out, "EXECUTION SUMMARY")?;
            writeln!(out, "  insts.retired          {}", self.instructions_retired)?;
            writeln!(out, "  syscalls.unknown       {}", self.unknown_syscalls)?;
            writeln!(out, "{RULE}")?;
        }
        if want("instruction_mix") {
            let total = self.instructions_retired.max(1) as f64;
            writeln!(out, "INSTRUCTION MIX")?;
            for (op, count) in &self.opcode_counts {
                writeln!(
                    out,
                    "  op.{:<19} {} ({:.2}%)",
                    op.mnemonic(),
                    count,
                    (*count as f64 / total) * 100.0
                )?;
            }
            writeln!(out, "{RULE}")?;
        }
        if want("memory") {
            writeln!(out, "MEMORY")?;
            writeln!(out, "  bytes.stored           {}", self.bytes_stored)?;
            writeln!(out, "  stores.dropped         {}", self.stores_dropped)?;
            writeln!(out, "{RULE}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sections(f, &[])
    }
}
