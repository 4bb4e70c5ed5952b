use membit::codec;
use num_bigint::{BigInt, BigUint};

#[rstest::rstest]
#[case(0u32)]
#[case(1u32)]
#[case(42u32)]
#[case(255u32)]
#[case(65535u32)]
#[case(4294967295u32)]
fn unsigned_big_integer_round_trips_at_32_bits(#[case] v: u32) {
    let region = codec::from_natural_big_integer_unsigned(&BigUint::from(v), Some(32)).unwrap();
    assert_eq!(codec::into_natural_big_integer(&region), BigUint::from(v));
}

#[rstest::rstest]
#[case(-128i64)]
#[case(-1i64)]
#[case(0i64)]
#[case(1i64)]
#[case(127i64)]
fn signed_big_integer_round_trips_at_8_bits(#[case] v: i64) {
    let region = codec::from_numeric_big_integer_signed(&BigInt::from(v), Some(8)).unwrap();
    assert_eq!(codec::into_numeric_big_integer(&region), BigInt::from(v));
}

#[test]
fn unsigned_out_of_range_is_rejected() {
    assert!(codec::from_natural_big_integer_unsigned(&BigUint::from(256u32), Some(8)).is_err());
    assert!(codec::from_natural_big_integer_unsigned(&BigUint::from(255u32), Some(8)).is_ok());
}

#[test]
fn signed_boundaries_at_four_bits() {
    assert!(codec::from_natural_big_integer_signed(&BigInt::from(-8), Some(4)).is_ok());
    assert!(codec::from_natural_big_integer_signed(&BigInt::from(7), Some(4)).is_ok());
    assert!(codec::from_natural_big_integer_signed(&BigInt::from(-9), Some(4)).is_err());
    assert!(codec::from_natural_big_integer_signed(&BigInt::from(8), Some(4)).is_err());
}

#[test]
fn zero_target_length_is_always_the_null_region() {
    let region = codec::from_natural_u32(0xDEAD_BEEF, Some(0)).unwrap();
    assert_eq!(region.bit_length(), 0);
    let region = codec::from_natural_big_integer_unsigned(&BigUint::from(9000u32), Some(0)).unwrap();
    assert_eq!(region.bit_length(), 0);
}

#[test]
fn fixed_width_scalar_numeric_round_trips() {
    let region = codec::from_numeric_i32(-12345, Some(32)).unwrap();
    let decoded = codec::into_numeric_big_integer(&region);
    assert_eq!(decoded, BigInt::from(-12345));
}

#[test]
fn float_truncation_below_native_width_is_rejected() {
    assert!(codec::from_natural_f32(1.5, Some(16)).is_err());
    assert!(codec::from_natural_f64(1.5, Some(32)).is_err());
    assert!(codec::from_natural_f64(1.5, Some(64)).is_ok());
}

#[test]
fn range_helpers_match_two_complement_bounds() {
    assert_eq!(codec::range_unsigned(8), (BigUint::from(0u32), BigUint::from(255u32)));
    assert_eq!(codec::range_signed(8), (BigInt::from(-128), BigInt::from(127)));
    assert!(codec::is_in_range_unsigned(&BigUint::from(255u32), 8));
    assert!(!codec::is_in_range_unsigned(&BigUint::from(256u32), 8));
    assert!(codec::is_in_range_signed(&BigInt::from(-128), 8));
    assert!(!codec::is_in_range_signed(&BigInt::from(-129), 8));
}

#[test]
fn bytes_utf8_and_bit_list_codecs_agree_on_length() {
    let from_str = codec::from_bytes_utf8("hi", None).unwrap();
    assert_eq!(from_str.bit_length(), 16);

    let from_list = codec::from_bit_list(&[1, 0, 1, 1]).unwrap();
    assert_eq!(from_list.bit_length(), 4);

    assert!(codec::from_bit_list(&[1, 2, 0]).is_err());
}

#[test]
fn grouped_bits_builds_one_group_per_entry() {
    let region = codec::from_grouped_bits(&[vec![1, 0, 1], vec![0, 0]]).unwrap();
    assert_eq!(region.byte_length(), 2);
}
