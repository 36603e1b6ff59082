use rust_decimal::Decimal;

pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

/// MicroAlgo를 ALGO로 변환
pub fn microalgo_to_algo(microalgo: u64) -> Decimal {
    Decimal::from(microalgo) / Decimal::from(MICROALGOS_PER_ALGO)
}
