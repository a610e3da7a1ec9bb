use derive_more::{AsRef, Display, From};
use indexmap::IndexMap;
use joinery::JoinableIterator;
use log::warn;
use serde::{Deserialize, Serialize};

/// Opaque compound identifier, e.g. `ZINC000000000001`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct MoleculeId(String);

#[derive(Clone, PartialEq, Eq, Hash, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct VendorName(String);

#[derive(Clone, PartialEq, Eq, Hash, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct SupplierCode(String);

/// Supplier codes of one vendor, without repeats, in the order they were first seen.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct SupplierCodes(Vec<SupplierCode>);
impl SupplierCodes {
    /// Returns `false` if `code` was already present.
    pub fn push(&mut self, code: SupplierCode) -> bool {
        if self.0.contains(&code) {
            return false;
        }
        self.0.push(code);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &SupplierCode> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl FromIterator<SupplierCode> for SupplierCodes {
    fn from_iter<I: IntoIterator<Item = SupplierCode>>(iter: I) -> Self {
        let mut ret = Self::default();
        ret.extend(iter);
        ret
    }
}
impl Extend<SupplierCode> for SupplierCodes {
    fn extend<I: IntoIterator<Item = SupplierCode>>(&mut self, iter: I) {
        for code in iter {
            self.push(code);
        }
    }
}
impl std::fmt::Display for SupplierCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join_with(" "))
    }
}

/// Vendor listing of a single page, vendors kept in first-seen order.
pub type VendorListing = IndexMap<VendorName, SupplierCodes>;

/// Groups `(vendor, code)` pairs by vendor.
pub fn group_by_vendor(
    pairs: impl IntoIterator<Item = (VendorName, SupplierCode)>,
) -> VendorListing {
    let mut listing = VendorListing::new();
    for (vendor, code) in pairs {
        listing.entry(vendor).or_default().push(code);
    }
    listing
}

/// One output record: the identifier plus every vendor found for it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Row {
    molecule_id: MoleculeId,
    vendors: VendorListing,
}
impl Row {
    pub const ID_COLUMN: &'static str = "molecule_id";
    /// Column name used for a vendor that is itself called [`Self::ID_COLUMN`].
    pub const CLASHING_VENDOR_COLUMN: &'static str = "molecule_id (vendor)";

    pub fn new(molecule_id: MoleculeId, vendors: VendorListing) -> Self {
        let vendors = if vendors.keys().any(|v| v.0 == Self::ID_COLUMN) {
            warn!(
                "{molecule_id}: vendor {:?} is stored as {:?}",
                Self::ID_COLUMN,
                Self::CLASHING_VENDOR_COLUMN
            );
            vendors
                .into_iter()
                .map(|(vendor, codes)| {
                    if vendor.0 == Self::ID_COLUMN {
                        (VendorName(Self::CLASHING_VENDOR_COLUMN.to_owned()), codes)
                    } else {
                        (vendor, codes)
                    }
                })
                .collect()
        } else {
            vendors
        };
        Self {
            molecule_id,
            vendors,
        }
    }

    /// Row of a lookup that produced nothing.
    pub fn bare(molecule_id: MoleculeId) -> Self {
        Self::new(molecule_id, VendorListing::new())
    }

    pub fn molecule_id(&self) -> &MoleculeId {
        &self.molecule_id
    }

    pub fn vendors(&self) -> &VendorListing {
        &self.vendors
    }

    /// Field value for `column`, if this row has one.
    pub fn get(&self, column: &str) -> Option<String> {
        if column == Self::ID_COLUMN {
            return Some(self.molecule_id.to_string());
        }
        self.vendors
            .iter()
            .find(|(vendor, _)| vendor.0 == column)
            .map(|(_, codes)| codes.to_string())
    }

    /// Column names present in this row, `molecule_id` first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(Self::ID_COLUMN).chain(self.vendors.keys().map(|v| v.0.as_str()))
    }
}
