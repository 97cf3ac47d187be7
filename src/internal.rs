/// `$a * $b + $c`, fused when the `fma` feature is on.
macro_rules! mul_add {
    ($a:expr, $b:expr, $c:expr) => {
        if cfg!(feature = "fma") {
            f64::mul_add($a, $b, $c)
        } else {
            $a * $b + $c
        }
    };
}

pub(crate) use mul_add;

/// Improved Kahan–Babuška algorithm
///
/// see: https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements
pub(crate) fn ksum<I>(vs: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut c = 0.0;
    for v in vs {
        let t = sum + v;
        c += if sum.abs().ge(&v.abs()) {
            (sum - t) + v
        } else {
            (v - t) + sum
        };
        sum = t
    }
    sum + c
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ksum() {
        assert_eq!(ksum([]), 0.0);
        assert_eq!(ksum([1.0, 2.0, 3.0]), 6.0);
        // naive summation loses the 1.0 entirely
        assert_eq!(ksum([1e100, 1.0, -1e100]), 1.0);
    }

    #[test]
    fn test_mul_add() {
        assert_eq!(mul_add!(2.0_f64, 3.0, 4.0), 10.0);
    }
}
