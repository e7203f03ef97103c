//! Class×field and class×static-field lookup for the exclusion policy
//! (spec §4.2).

use std::collections::HashMap;

use retainer_model::Exclusion;

/// One entry produced by an [`crate::parser::ExclusionsFactory`] (spec §6).
///
/// The plain [`Exclusion`] record in `retainer-model` carries only
/// `{status, description}`; this wraps it with the key it's indexed under,
/// matching the three exclusion kinds spec.md §3 lists.
#[derive(Debug, Clone)]
pub enum ExclusionEntry {
    Thread {
        thread_name: String,
        exclusion: Exclusion,
    },
    StaticField {
        class_name: String,
        field_name: String,
        exclusion: Exclusion,
    },
    InstanceField {
        class_name: String,
        field_name: String,
        exclusion: Exclusion,
    },
}

/// Built once per `find_paths` call from the exclusion sequence the caller's
/// factory produces.
#[derive(Debug, Default)]
pub struct ExclusionIndex {
    thread: HashMap<String, Exclusion>,
    static_field: HashMap<(String, String), Exclusion>,
    instance_field: HashMap<(String, String), Exclusion>,
}

impl ExclusionIndex {
    #[must_use]
    pub fn build(entries: Vec<ExclusionEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            match entry {
                ExclusionEntry::Thread {
                    thread_name,
                    exclusion,
                } => {
                    index.thread.insert(thread_name, exclusion);
                }
                ExclusionEntry::StaticField {
                    class_name,
                    field_name,
                    exclusion,
                } => {
                    index.static_field.insert((class_name, field_name), exclusion);
                }
                ExclusionEntry::InstanceField {
                    class_name,
                    field_name,
                    exclusion,
                } => {
                    index
                        .instance_field
                        .insert((class_name, field_name), exclusion);
                }
            }
        }
        index
    }

    /// Exclusion for a thread name. Retained for the future root-type
    /// extension (spec §9 Open Question); unused by today's search.
    #[must_use]
    pub fn thread_name(&self, thread_name: &str) -> Option<&Exclusion> {
        self.thread.get(thread_name)
    }

    #[must_use]
    pub fn static_field(&self, class_name: &str, field_name: &str) -> Option<&Exclusion> {
        self.static_field
            .get(&(class_name.to_string(), field_name.to_string()))
    }

    #[must_use]
    pub fn instance_field(&self, class_name: &str, field_name: &str) -> Option<&Exclusion> {
        self.instance_field
            .get(&(class_name.to_string(), field_name.to_string()))
    }
}
