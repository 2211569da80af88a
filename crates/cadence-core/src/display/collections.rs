//! Newtype wrappers for displaying lists of models.

use std::{fmt, ops::Index};

use crate::models::{Goal, OmissionRecord, Plan, RedistributionRecord, TaxonomyNode};

macro_rules! list_wrapper {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }
    };
}

list_wrapper!(
    /// Plans, one section each.
    Plans,
    Plan
);
list_wrapper!(
    /// Goals grouped under a heading per scheduled date.
    ///
    /// ```rust
    /// use cadence_core::display::Goals;
    ///
    /// assert_eq!(Goals(vec![]).to_string(), "No goals found.\n");
    /// ```
    Goals,
    Goal
);
list_wrapper!(
    /// Taxonomy nodes as a flat list.
    TaxonomyNodes,
    TaxonomyNode
);
list_wrapper!(
    /// A plan's redistribution log, oldest first.
    RedistributionLog,
    RedistributionRecord
);
list_wrapper!(
    /// A plan's omission log, oldest first.
    OmissionLog,
    OmissionRecord
);

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Goals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No goals found.");
        }
        let mut current = None;
        for goal in &self.0 {
            if current != Some(goal.scheduled_date) {
                current = Some(goal.scheduled_date);
                writeln!(f, "## {}", goal.scheduled_date)?;
                writeln!(f)?;
            }
            write!(f, "{goal}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TaxonomyNodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No taxonomy nodes found.");
        }
        for node in &self.0 {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RedistributionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No goals have been redistributed.");
        }
        for record in &self.0 {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OmissionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No goals have been omitted.");
        }
        for record in &self.0 {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}
