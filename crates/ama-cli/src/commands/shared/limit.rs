/// Compute effective limit with precedence: global flag -> configured default.
#[must_use]
pub const fn effective_limit(global: Option<u32>, fallback: u32) -> u32 {
    match global {
        Some(limit) => limit,
        None => fallback,
    }
}
