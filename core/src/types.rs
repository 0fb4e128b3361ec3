//! Shared primitive types used across the entire desk.

/// A stable, unique identifier for a provider.
/// House providers carry their configured id; ad-hoc ids are millisecond stamps.
pub type ProviderId = i64;

/// Hour-of-day or a duration, expressed in decimal hours (9.5 = 9:30).
pub type DecimalHours = f64;

/// Patients waiting in the lobby. Unsigned: a negative count is unrepresentable.
pub type LobbyCount = u32;
