use super::*;

use std::cmp::Ordering;


#[test]
fn collapse() {
    assert_eq!(Float(4.0).collapse(), Integer(4));
    assert_eq!(Float(-0.0).collapse(), Integer(0));
    assert_eq!(Float(4.5).collapse(), Float(4.5));
    assert_eq!(Integer(7).collapse(), Integer(7));
    assert_eq!(Float(1e300).collapse(), Float(1e300));
    assert!(matches!(Float(f64::NAN).collapse(), Float(f) if f.is_nan()));
    assert_eq!(Float(f64::INFINITY).collapse(), Float(f64::INFINITY));
}

#[test]
fn mixed_arithmetic_promotes() {
    let mut n = Integer(2);
    n += Integer(3);
    assert_eq!(n, Integer(5));
    n += Float(0.5);
    assert_eq!(n, Float(5.5));
    n *= Integer(2);
    assert_eq!(n, Float(11.0));
    n -= Float(1.0);
    assert_eq!(n.collapse(), Integer(10));
}

#[test]
fn overflow_promotes_to_float() {
    let mut n = Integer(i64::MAX);
    n += Integer(1);
    assert_eq!(n, Float(i64::MAX as f64 + 1.0));

    let mut n = Integer(i64::MIN);
    n -= Integer(1);
    assert!(matches!(n, Float(_)));

    let mut n = Integer(i64::MAX);
    n *= Integer(2);
    assert!(matches!(n, Float(_)));
}

#[test]
fn division() {
    let mut n = Integer(10);
    n /= Integer(4);
    assert_eq!(n, Float(2.5));

    let mut n = Integer(10);
    n /= Integer(2);
    assert_eq!(n, Integer(5));

    let mut n = Integer(10);
    n /= Float(2.0);
    assert_eq!(n, Float(5.0));
    assert_eq!(n.collapse(), Integer(5));
}

#[test]
fn exact_integer_division_keeps_precision() {
    // Beyond 2^53, where f64 can no longer represent every integer.
    let mut n = Integer(9007199254740993);
    n /= Integer(1);
    assert_eq!(n, Integer(9007199254740993));

    let mut n = Integer(i64::MAX);
    n /= Integer(1);
    assert_eq!(n, Integer(i64::MAX));

    let mut n = Integer(-9007199254740994);
    n /= Integer(2);
    assert_eq!(n, Integer(-4503599627370497));

    // MIN / -1 overflows i64.
    let mut n = Integer(i64::MIN);
    n /= Integer(-1);
    assert_eq!(n, Float(-(i64::MIN as f64)));
}

#[test]
fn remainder() {
    let mut n = Integer(7);
    n %= Integer(3);
    assert_eq!(n, Integer(1));

    let mut n = Integer(-7);
    n %= Integer(3);
    assert_eq!(n, Integer(-1));

    let mut n = Float(7.5);
    n %= Integer(2);
    assert_eq!(n, Float(1.5));

    let mut n = Integer(i64::MIN);
    n %= Integer(-1);
    assert!(matches!(n, Float(_)));
}

#[test]
fn pow_and_neg() {
    assert_eq!(Integer(2).pow(Integer(10)), Float(1024.0));
    assert_eq!(Integer(4).pow(Float(0.5)), Float(2.0));
    assert_eq!(Integer(3).neg(), Integer(-3));
    assert_eq!(Float(1.5).neg(), Float(-1.5));
    assert_eq!(Integer(i64::MIN).neg(), Float(-(i64::MIN as f64)));
}

#[test]
fn ordering_across_kinds() {
    assert_eq!(Integer(1).partial_cmp(&Float(1.5)), Some(Ordering::Less));
    assert_eq!(Float(2.0).partial_cmp(&Integer(2)), Some(Ordering::Equal));
    assert_eq!(Integer(3).partial_cmp(&Integer(2)), Some(Ordering::Greater));
    assert_eq!(Float(f64::NAN).partial_cmp(&Integer(0)), None);
}

#[test]
fn value_conversion() {
    assert_eq!(Number::try_from(&Value::Integer(3)), Ok(Integer(3)));
    assert_eq!(Number::try_from(&Value::Float(0.5)), Ok(Float(0.5)));
    assert_eq!(Number::try_from(&Value::string("3")), Err(()));
    assert_eq!(Value::from(Float(2.5)), Value::Float(2.5));
    assert!(Integer(0).is_zero());
    assert!(Float(-0.0).is_zero());
    assert_eq!(Number::default(), Integer(0));
}
