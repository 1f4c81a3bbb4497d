/// Instrument class with the domestic fee schedule (A-share style)
pub const CLASS_DOMESTIC_EQUITY: &str = "domestic-equity";

/// Instrument class with the cross-border fee schedule (HK style)
pub const CLASS_CROSS_BORDER_EQUITY: &str = "cross-border-equity";

/// Instrument class with manual commissions and no tax (US style)
pub const CLASS_FOREIGN_EQUITY: &str = "foreign-equity";

/// Decimal precision for serialized values
pub const DECIMAL_PRECISION: u32 = 8;

/// Decimal precision for monetary amounts (prices, totals, fees, P/L)
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for quantities (fractional shares after splits)
pub const QUANTITY_DECIMAL_PRECISION: u32 = 4;

/// Date format for transaction and corporate-action dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
