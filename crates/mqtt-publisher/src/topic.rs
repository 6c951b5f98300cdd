//! Venus OS topic names.

/// Write topic for the ESS minimum state-of-charge setting of a GX device.
pub fn minsoc_topic(serial: &str) -> String {
    format!(
        "W/{}/settings/0/Settings/CGwacs/BatteryLife/MinimumSocLimit",
        serial
    )
}
