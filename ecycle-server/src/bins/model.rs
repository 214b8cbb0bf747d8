//! Domain records for collection bins.

/// One normalized collection-bin location.
///
/// Every point in a loaded table has coordinates and a derived district;
/// rows without them are dropped at load time. `name` and `address` are
/// empty strings when the source lacks those columns, which makes them
/// transparent to search (an empty field never contains a non-empty
/// term).
#[derive(Debug, Clone, PartialEq)]
pub struct PickupPoint {
    /// Establishment or bin label.
    pub name: String,

    /// Collection address, with the metro-area prefix normalized to its
    /// short form.
    pub address: String,

    /// Administrative district derived from the address.
    pub district: String,

    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,
}
