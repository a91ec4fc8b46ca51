/// Size of the PNG signature prefixing every stream.
///
/// The signature bytes themselves are not inspected, the cursor is
/// advanced past them.
pub const PNG_SIGNATURE_SIZE: usize = 8;

/// Divisor converting pixels-per-meter (pHYs unit 1) to dots-per-inch.
pub const INCHES_PER_METER: f64 = 39.370_078_7;
