use bson::Bson;

// Integer variants compare exactly; widening to f64 would merge values past 2^53.
const fn as_exact_int(x: &Bson) -> Option<i64> {
    match x {
        Bson::Int32(i) => Some(*i as i64),
        Bson::Int64(i) => Some(*i),
        _ => None,
    }
}

fn as_f64_num(x: &Bson) -> Option<f64> {
    match x {
        Bson::Int32(i) => Some(f64::from(*i)),
        #[allow(clippy::cast_precision_loss)]
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        Bson::Decimal128(d) => Some(d.to_string().parse::<f64>().unwrap_or(f64::NAN)),
        Bson::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Relational `a > b` over dynamic values.
///
/// Numbers (booleans count as 0/1) compare numerically, strings by UTF-16
/// code units, datetimes by timestamp. Every other pairing, an absent
/// operand included, is "not greater".
#[must_use]
pub fn is_greater(a: Option<&Bson>, b: Option<&Bson>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    if let (Some(x), Some(y)) = (as_exact_int(a), as_exact_int(b)) {
        return x > y;
    }
    if let (Some(x), Some(y)) = (as_f64_num(a), as_f64_num(b)) {
        // NaN compares false either way
        return x > y;
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => x.encode_utf16().gt(y.encode_utf16()),
        (Bson::DateTime(x), Bson::DateTime(y)) => x.timestamp_millis() > y.timestamp_millis(),
        _ => false,
    }
}

/// Membership equality used by `filter_in`: numeric values are equal across
/// numeric variants, everything else uses plain `Bson` equality.
#[must_use]
pub fn values_equal(a: &Bson, b: &Bson) -> bool {
    if let (Some(x), Some(y)) = (as_exact_int(a), as_exact_int(b)) {
        return x == y;
    }
    if is_number(a) && is_number(b) {
        return as_f64_num(a) == as_f64_num(b);
    }
    a == b
}

const fn is_number(x: &Bson) -> bool {
    matches!(x, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_))
}

pub(crate) fn is_in_set(v: &Bson, set: &[Bson]) -> bool {
    set.iter().any(|x| values_equal(x, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_variants() {
        assert!(is_greater(Some(&Bson::Int64(20)), Some(&Bson::Int32(10))));
        assert!(is_greater(Some(&Bson::Double(10.5)), Some(&Bson::Int32(10))));
        assert!(!is_greater(Some(&Bson::Int32(10)), Some(&Bson::Double(10.0))));
        assert!(is_greater(Some(&Bson::Boolean(true)), Some(&Bson::Int32(0))));
    }

    #[test]
    fn nan_is_never_greater() {
        let nan = Bson::Double(f64::NAN);
        assert!(!is_greater(Some(&nan), Some(&Bson::Int32(1))));
        assert!(!is_greater(Some(&Bson::Int32(1)), Some(&nan)));
    }

    #[test]
    fn strings_compare_lexicographically() {
        let a = Bson::String("b".into());
        let b = Bson::String("abc".into());
        assert!(is_greater(Some(&a), Some(&b)));
        assert!(!is_greater(Some(&b), Some(&a)));
    }

    #[test]
    fn strings_compare_by_utf16_units() {
        // U+FF5E is one unit above the surrogate range that encodes U+1F600.
        let bmp = Bson::String("\u{FF5E}".into());
        let astral = Bson::String("\u{1F600}".into());
        assert!(is_greater(Some(&bmp), Some(&astral)));
        assert!(!is_greater(Some(&astral), Some(&bmp)));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let hi = Bson::Int64((1 << 53) + 1);
        let lo = Bson::Int64(1 << 53);
        assert!(is_greater(Some(&hi), Some(&lo)));
        assert!(!is_greater(Some(&lo), Some(&hi)));
        assert!(!values_equal(&hi, &lo));
        assert!(values_equal(&Bson::Int32(5), &Bson::Int64(5)));
    }

    #[test]
    fn incomparable_pairs_are_not_greater() {
        let s = Bson::String("9".into());
        let n = Bson::Int32(1);
        assert!(!is_greater(Some(&s), Some(&n)));
        assert!(!is_greater(Some(&n), Some(&s)));
        assert!(!is_greater(None, Some(&n)));
        assert!(!is_greater(Some(&n), None));
        assert!(!is_greater(Some(&Bson::Null), Some(&Bson::Null)));
    }

    #[test]
    fn membership_equality() {
        assert!(values_equal(&Bson::Int32(10), &Bson::Double(10.0)));
        assert!(values_equal(&Bson::Int64(7), &Bson::Int32(7)));
        assert!(!values_equal(&Bson::Double(f64::NAN), &Bson::Double(f64::NAN)));
        assert!(!values_equal(&Bson::String("10".into()), &Bson::Int32(10)));
        assert!(!values_equal(&Bson::Boolean(true), &Bson::Int32(1)));
        assert!(values_equal(&Bson::String("x".into()), &Bson::String("x".into())));
    }
}
