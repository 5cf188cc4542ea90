//! City tier lookup
//!
//! Cities are matched exactly against fixed tier lists; anything else is tier 3.

use serde::{Deserialize, Serialize};

const TIER_1_CITIES: [&str; 7] = [
    "Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune",
];

const TIER_2_CITIES: [&str; 48] = [
    "Jaipur",
    "Chandigarh",
    "Indore",
    "Lucknow",
    "Patna",
    "Ranchi",
    "Visakhapatnam",
    "Coimbatore",
    "Bhopal",
    "Nagpur",
    "Vadodara",
    "Surat",
    "Rajkot",
    "Jodhpur",
    "Raipur",
    "Amritsar",
    "Varanasi",
    "Agra",
    "Dehradun",
    "Mysore",
    "Jabalpur",
    "Guwahati",
    "Thiruvananthapuram",
    "Ludhiana",
    "Nashik",
    "Allahabad",
    "Udaipur",
    "Aurangabad",
    "Hubli",
    "Belgaum",
    "Salem",
    "Vijayawada",
    "Tiruchirappalli",
    "Bhavnagar",
    "Gwalior",
    "Dhanbad",
    "Bareilly",
    "Aligarh",
    "Gaya",
    "Kozhikode",
    "Warangal",
    "Kolhapur",
    "Bilaspur",
    "Jalandhar",
    "Noida",
    "Guntur",
    "Asansol",
    "Siliguri",
];

/// Coarse city classification, serialized as 1, 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CityTier {
    One,
    Two,
    Three,
}

impl CityTier {
    pub fn of(city: &str) -> Self {
        if TIER_1_CITIES.contains(&city) {
            CityTier::One
        } else if TIER_2_CITIES.contains(&city) {
            CityTier::Two
        } else {
            CityTier::Three
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            CityTier::One => 1,
            CityTier::Two => 2,
            CityTier::Three => 3,
        }
    }
}

impl From<CityTier> for u8 {
    fn from(tier: CityTier) -> u8 {
        tier.number()
    }
}

impl TryFrom<u8> for CityTier {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(CityTier::One),
            2 => Ok(CityTier::Two),
            3 => Ok(CityTier::Three),
            _ => Err(format!("city tier must be 1, 2 or 3, got {}", n)),
        }
    }
}
