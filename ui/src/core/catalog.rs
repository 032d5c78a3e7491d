//! LL97 property-type catalogue offered by the input form.

/// Use type preselected for new rows.
pub const DEFAULT_USE_TYPE: &str = "Office";

pub const USE_TYPES: &[&str] = &[
    "Adult Education",
    "Ambulatory Surgical Center",
    "Automobile Dealership",
    "Bank Branch",
    "Bowling Alley",
    "College/University",
    "Convenience Store without Gas Station",
    "Courthouse",
    "Data Center",
    "Distribution Center",
    "Enclosed Mall",
    "Financial Office",
    "Fitness Center/Health Club/Gym",
    "Food Sales",
    "Food Service",
    "Hospital (General Medical & Surgical)",
    "Hotel",
    "K-12 School",
    "Laboratory",
    "Library",
    "Lifestyle Center",
    "Mailing Center/Post Office",
    "Manufacturing/Industrial Plant",
    "Medical Office",
    "Movie Theater",
    "Multifamily Housing",
    "Museum",
    "Non-Refrigerated Warehouse",
    "Office",
    "Other - Education",
    "Other - Entertainment & Public Assembly",
    "Other - Mall",
    "Other - Public Services",
    "Other - Recreation",
    "Other - Restaurant /Bar",
    "Other - Services",
    "Other - Specialty Hospital",
    "Other-  Lodging/Residential",
    "OtherTechnology /Science",
    "Outpatient Rehabilitation/Physical Therapy",
    "Parking",
    "Performing Arts",
    "Personal Services (Health/Beauty, Dry Cleaning, etc.)",
    "Pre-school/Daycare",
    "Refrigerated Warehouse",
    "Repair Services (Vehicle, Shoe, Locksmith, etc.)",
    "Residence Hall or Dormitory",
    "Residential Care Facility",
    "Restaurant",
    "Retail Store",
    "Self-Storage Facility",
    "Senior Care Community",
    "Social/Meeting Hall",
    "Strip Mall",
    "Supermarket /Grocery Store",
    "Transportation Terminal/Station",
    "Urgent Care/Clinic/Other Outpatient",
    "Vocational School",
    "Wholesale Club or Supercenter",
    "Worship Facility",
    "None",
];

/// A utility input: wire key, display label and unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtilityKind {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

/// Canonical utilities in display order.
pub const UTILITIES: [UtilityKind; 5] = [
    UtilityKind {
        key: "electricity",
        label: "Electricity",
        unit: "kWh",
    },
    UtilityKind {
        key: "gas",
        label: "Gas",
        unit: "therms",
    },
    UtilityKind {
        key: "fuelOil2",
        label: "Fuel Oil #2",
        unit: "gal",
    },
    UtilityKind {
        key: "fuelOil4",
        label: "Fuel Oil #4",
        unit: "gal",
    },
    UtilityKind {
        key: "steam",
        label: "Steam",
        unit: "MLb",
    },
];

pub fn utility(key: &str) -> Option<&'static UtilityKind> {
    UTILITIES.iter().find(|kind| kind.key == key)
}
