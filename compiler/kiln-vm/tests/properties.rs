//! Width-generic properties of the arithmetic intrinsics, checked against
//! 128-bit reference arithmetic.

use kiln_target::{IntWidth, Size};
use kiln_utils::testing::TEST_OPTIONS;
use kiln_vm::{
    intrinsics::{
        aggregate::zero_init_aggregate,
        arith::{add_with_overflow, add_with_overflow_carry},
        overflow::{uadd_with_overflow, uadd_with_overflow_and_carry},
        wide::add_u128,
    },
    memory::{Address, HasMemoryAccess, Memory},
};
use proptest::{prelude::*, sample::select};

fn width() -> impl Strategy<Value = IntWidth> {
    select(IntWidth::ALL.to_vec())
}

/// A width together with two operands that fit in it.
fn operands() -> impl Strategy<Value = (IntWidth, u64, u64)> {
    (width(), any::<u64>(), any::<u64>())
        .prop_map(|(width, left, right)| (width, width.truncate(left), width.truncate(right)))
}

fn reference_add(width: IntWidth, values: &[u64]) -> (u64, bool) {
    let total: u128 = values.iter().map(|value| u128::from(*value)).sum();
    ((total as u64) & width.mask(), total >> width.bits() != 0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(TEST_OPTIONS.samples as u32))]

    #[test]
    fn sum_and_overflow_match_reference((width, left, right) in operands()) {
        if !TEST_OPTIONS.should_run("sum_and_overflow_match_reference") {
            return Ok(());
        }

        let result = add_with_overflow(width, left, right);
        let (sum, overflow) = reference_add(width, &[left, right]);

        prop_assert_eq!(result.truncated_sum, sum);
        prop_assert_eq!(result.overflow, overflow);
    }

    #[test]
    fn carry_overflow_is_either_half((width, left, right) in operands(), carry_in in 0u64..=1) {
        if !TEST_OPTIONS.should_run("carry_overflow_is_either_half") {
            return Ok(());
        }

        let base = add_with_overflow(width, left, right);
        let carried = add_with_overflow(width, base.truncated_sum, carry_in);
        let result = add_with_overflow_carry(width, left, right, carry_in);

        prop_assert_eq!(result.overflow, base.overflow || carried.overflow);
        prop_assert_eq!((result.truncated_sum, result.overflow), reference_add(width, &[left, right, carry_in]));
    }

    #[test]
    fn full_width_carry_in((width, left, right) in operands(), carry_in in any::<u64>()) {
        if !TEST_OPTIONS.should_run("full_width_carry_in") {
            return Ok(());
        }

        let carry_in = width.truncate(carry_in);
        let base = add_with_overflow(width, left, right);
        let carried = add_with_overflow(width, base.truncated_sum, carry_in);
        let result = add_with_overflow_carry(width, left, right, carry_in);

        prop_assert_eq!(result.truncated_sum, carried.truncated_sum);
        prop_assert_eq!(result.overflow, base.overflow || carried.overflow);
    }

    #[test]
    fn stored_pair_reads_back((width, left, right) in operands(), flag_gap in 0u64..8) {
        if !TEST_OPTIONS.should_run("stored_pair_reads_back") {
            return Ok(());
        }

        let mut memory = Memory::new(Size::from_bytes(32));
        let target = Address::new(4);
        let flag_offset = width.size().bytes() + flag_gap;

        uadd_with_overflow(&mut memory, width, left, right, target, flag_offset).unwrap();
        let (sum, overflow) = reference_add(width, &[left, right]);

        prop_assert_eq!(memory.load_int(target, width).unwrap(), sum);
        prop_assert_eq!(memory.load_bool(target.offset(flag_offset)).unwrap(), overflow);
    }

    #[test]
    fn flag_overlapping_sum_is_written_last(left in any::<u32>(), right in any::<u32>()) {
        if !TEST_OPTIONS.should_run("flag_overlapping_sum_is_written_last") {
            return Ok(());
        }

        // With a zero offset the flag byte overwrites the low byte of the sum.
        let mut memory = Memory::new(Size::from_bytes(4));
        uadd_with_overflow(&mut memory, IntWidth::I32, left.into(), right.into(), Address::NULL, 0).unwrap();

        let (sum, overflow) = left.overflowing_add(right);
        prop_assert_eq!(memory.load_u8(Address::NULL).unwrap(), u8::from(overflow));
        prop_assert_eq!(memory.load_u32(Address::NULL).unwrap() >> 8, sum >> 8);
    }

    #[test]
    fn carry_out_reads_back((width, left, right) in operands(), carry_in in 0u64..=1) {
        if !TEST_OPTIONS.should_run("carry_out_reads_back") {
            return Ok(());
        }

        let mut memory = Memory::new(Size::from_bytes(8));
        let sum = uadd_with_overflow_and_carry(&mut memory, width, left, right, carry_in, Address::NULL).unwrap();
        let (expected, overflow) = reference_add(width, &[left, right, carry_in]);

        prop_assert_eq!(sum, expected);
        prop_assert_eq!(memory.load_int(Address::NULL, width).unwrap(), u64::from(overflow));
    }

    #[test]
    fn u128_chain_matches_native(left in any::<u128>(), right in any::<u128>()) {
        if !TEST_OPTIONS.should_run("u128_chain_matches_native") {
            return Ok(());
        }

        let mut memory = Memory::new(Size::from_bytes(8));
        let result = add_u128(&mut memory, left, right, Address::NULL).unwrap();

        prop_assert_eq!(result, left.overflowing_add(right));
    }

    #[test]
    fn zero_init_zeroes_exactly_the_region(start in 0u64..32, length in 0u64..32, fill in any::<u8>()) {
        if !TEST_OPTIONS.should_run("zero_init_zeroes_exactly_the_region") {
            return Ok(());
        }

        let mut memory = Memory::new(Size::from_bytes(64));
        memory.fill(Address::NULL, memory.size(), fill).unwrap();

        let address = Address::new(start);
        prop_assert_eq!(zero_init_aggregate(&mut memory, address, Size::from_bytes(length)).unwrap(), address);

        let once = memory.clone();
        zero_init_aggregate(&mut memory, address, Size::from_bytes(length)).unwrap();

        for (index, byte) in memory.bytes(Address::NULL, memory.size()).unwrap().iter().enumerate() {
            let index = index as u64;
            let expected = if (start..start + length).contains(&index) { 0 } else { fill };
            prop_assert_eq!(*byte, expected);
        }

        prop_assert_eq!(
            memory.bytes(Address::NULL, memory.size()).unwrap(),
            once.bytes(Address::NULL, once.size()).unwrap()
        );
    }
}
