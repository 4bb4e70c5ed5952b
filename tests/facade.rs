use membit::{AnyMem, BitList, GroupedBits, Mem, Null, Signed, Unsigned};

#[test]
fn mem_rejects_malformed_bit_range() {
    let m = Mem::new(0xABu8, Some(8)).unwrap();
    assert!(m.bits(5, 2).is_err());
    assert!(m.bytes(1, 0).is_err());
}

#[test]
fn mem_set_bits_preserves_surrounding_bits() {
    let m = Mem::new(0u8, Some(8)).unwrap();
    let payload = Mem::new(0b111u8, Some(3)).unwrap();
    let updated = m.set_bits(2, &payload).unwrap();
    // writing three 1-bits at physical positions 2..5 of an all-zero byte
    // sets slots 2,3,4, i.e. the natural (LSB-first) value 0b00011100 = 28.
    assert_eq!(updated, Mem::new(28u8, Some(8)).unwrap());
}

#[test]
fn unsigned_checked_arithmetic_respects_width() {
    let a = Unsigned::new(200u8, Some(8)).unwrap();
    let b = Unsigned::new(100u8, Some(8)).unwrap();
    assert!(a.checked_add(&b).is_err());
    let sum = a.checked_add(&Unsigned::new(50u8, Some(8)).unwrap()).unwrap();
    assert_eq!(sum.bit_length(), 8);
}

#[test]
fn unsigned_checked_sub_rejects_underflow() {
    let a = Unsigned::new(1u8, Some(8)).unwrap();
    let b = Unsigned::new(2u8, Some(8)).unwrap();
    assert!(a.checked_sub(&b).is_err());
    assert!(b.checked_sub(&a).is_ok());
}

#[test]
fn unsigned_checked_div_rejects_zero_divisor() {
    let a = Unsigned::new(10u8, Some(8)).unwrap();
    let zero = Unsigned::new(0u8, Some(8)).unwrap();
    assert!(a.checked_div(&zero).is_err());
}

#[test]
fn signed_checked_add_overflow_matches_two_bit_boundary() {
    let a = Signed::new(1i8, Some(2)).unwrap();
    let b = Signed::new(2i8, Some(2)).unwrap();
    assert!(a.checked_add(&b).is_err());
    let ok = Signed::new(0i8, Some(2)).unwrap().checked_add(&a).unwrap();
    assert_eq!(ok.bit_length(), 2);
}

#[test]
fn signed_rejects_values_outside_declared_width() {
    assert!(Signed::new(8i8, Some(4)).is_err());
    assert!(Signed::new(7i8, Some(4)).is_ok());
    assert!(Signed::new(-9i8, Some(4)).is_err());
    assert!(Signed::new(-8i8, Some(4)).is_ok());
}

#[test]
fn unsigned_rejects_negative_fixed_width_input() {
    assert!(Unsigned::new(-5i32, Some(32)).is_err());
}

#[test]
fn mem_accepts_negative_big_integer_is_rejected() {
    use num_bigint::BigInt;
    assert!(Mem::new(BigInt::from(-5), Some(8)).is_err());
}

#[test]
fn signed_accepts_negative_big_integer() {
    use num_bigint::BigInt;
    assert!(Signed::new(BigInt::from(-5), Some(8)).is_ok());
}

#[test]
fn bit_list_and_grouped_bits_construct_via_facade() {
    let m = Mem::new(BitList(vec![1, 0, 1, 1]), None).unwrap();
    assert_eq!(m.bit_length(), 4);

    let g = Mem::new(GroupedBits(vec![vec![1, 0, 1], vec![0, 0]]), None).unwrap();
    assert_eq!(g.byte_length(), 2);
}

#[test]
fn string_initializer_dispatches_by_prefix_for_unsigned() {
    let hex = Unsigned::new("0xFF", Some(8)).unwrap();
    let decimal_like_bytes = Unsigned::new("FF", None).unwrap();
    assert_ne!(hex, decimal_like_bytes);
}

#[test]
fn null_initializer_produces_zero_region_of_requested_length() {
    let m = Mem::new(Null, Some(8)).unwrap();
    assert_eq!(m.bit_length(), 8);
    assert_eq!(m, Mem::new(0u8, Some(8)).unwrap());
}

#[test]
fn try_eq_across_kinds_is_rejected_same_kind_is_compared() {
    let a = AnyMem::Mem(Mem::new(7u8, Some(8)).unwrap());
    let b = AnyMem::Mem(Mem::new(7u8, Some(8)).unwrap());
    assert_eq!(membit::facade::try_eq(&a, &b).unwrap(), true);

    let c = AnyMem::Signed(Signed::new(7i8, Some(8)).unwrap());
    assert!(membit::facade::try_eq(&a, &c).is_err());
}

#[test]
fn region_copy_constructor_deep_copies() {
    let original = Mem::new(0b1010_1010u8, Some(8)).unwrap();
    let copy = Mem::new(original.region().clone(), None).unwrap();
    assert_eq!(original, copy);
}
