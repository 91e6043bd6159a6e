use strum::{EnumIter, IntoStaticStr};

/// The dimensions that make up a repository score, declared in breakdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum MetricKey {
    Stars,
    Forks,
    HasReadme,
    HasLicense,
    RecentActivity,
    HasWorkflows,
}

impl MetricKey {
    /// The compact camelCase key, e.g. `hasReadme`.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// The label shown to users, e.g. `Has Readme`.
    #[must_use]
    pub fn display_name(self) -> String {
        display_name(self.key())
    }
}

/// Turn a camelCase key into a spaced, capitalized label.
///
/// Every uppercase letter gets a space in front of it and the first letter is
/// uppercased, so `recentActivity` becomes `Recent Activity`.
#[must_use]
pub fn display_name(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);

    for (index, c) in key.chars().enumerate() {
        if index == 0 {
            label.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                label.push(' ');
            }
            label.push(c);
        }
    }

    label
}
