use crate::errors::Result;
use rand::Rng;
use std::io::Write;

/// Writes `amount` uniformly random integers, one decimal per line.
pub fn generate<W: Write, R: Rng>(out: &mut W, amount: u64, rng: &mut R) -> Result<u64> {
    for _ in 0..amount {
        let v: i32 = rng.random();
        writeln!(out, "{v}")?;
    }
    out.flush()?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_lines;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    #[test]
    fn output_parses_back() {
        let mut buf = Vec::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate(&mut buf, 100, &mut rng).unwrap(), 100);
        let items: Vec<i32> = parse_lines(Cursor::new(buf)).collect::<Result<_>>().unwrap();
        assert_eq!(items.len(), 100);
    }

    #[test]
    fn same_seed_same_data() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        generate(&mut a, 20, &mut StdRng::seed_from_u64(1)).unwrap();
        generate(&mut b, 20, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }
}
