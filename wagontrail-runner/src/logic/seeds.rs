use anyhow::{Context, Result, bail};

/// Largest span a single `a..b` token may expand to.
const MAX_RANGE_SPAN: u64 = 10_000;

/// Split a comma-separated CLI value into trimmed, non-empty tokens.
#[must_use]
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve CLI seed tokens into concrete seeds, first occurrence wins.
///
/// Accepts literal integers (negative values use their magnitude),
/// inclusive `a..=b` and half-open `a..b` ranges, and `random` for a
/// fresh entropy-backed seed.
///
/// # Errors
///
/// Fails on tokens that are neither numbers, ranges, nor `random`, and on
/// empty or oversized ranges.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    fn push(seed: u64, seeds: &mut Vec<u64>) {
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }

    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("random") {
            push(rand::random::<u64>(), &mut seeds);
            continue;
        }

        if let Some((start, end)) = token.split_once("..") {
            let (end, inclusive) = match end.strip_prefix('=') {
                Some(end) => (end, true),
                None => (end, false),
            };
            let start: u64 = start
                .trim()
                .parse()
                .with_context(|| format!("bad range start in {token:?}"))?;
            let end: u64 = end
                .trim()
                .parse()
                .with_context(|| format!("bad range end in {token:?}"))?;
            let end = if inclusive { end.saturating_add(1) } else { end };
            if end <= start {
                bail!("seed range {token:?} is empty");
            }
            if end - start > MAX_RANGE_SPAN {
                bail!("seed range {token:?} spans more than {MAX_RANGE_SPAN} seeds");
            }
            for seed in start..end {
                push(seed, &mut seeds);
            }
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            push(value, &mut seeds);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            push(value.unsigned_abs(), &mut seeds);
            continue;
        }

        bail!("unrecognized seed {token:?}");
    }

    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &str) -> Vec<String> {
        split_csv(raw)
    }

    #[test]
    fn split_csv_drops_blanks() {
        assert_eq!(split_csv(" a, ,b ,"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn numbers_and_ranges_expand_in_order() {
        let seeds = resolve_seed_inputs(&tokens("7, 1..3, 2..=4, -5")).unwrap();
        assert_eq!(seeds, vec![7, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn random_produces_one_seed() {
        let seeds = resolve_seed_inputs(&tokens("random")).unwrap();
        assert_eq!(seeds.len(), 1);
    }

    #[test]
    fn bad_tokens_are_rejected() {
        assert!(resolve_seed_inputs(&tokens("oregon")).is_err());
        assert!(resolve_seed_inputs(&tokens("5..5")).is_err());
        assert!(resolve_seed_inputs(&tokens("0..20000")).is_err());
        assert!(resolve_seed_inputs(&[]).is_err());
    }
}
