pub mod manifest;
pub mod rename_spec;
pub mod report;
pub mod substitution;

pub use manifest::{ICON_DIRECTIVES_KEY, IconPlatforms, ManifestEditor, ManifestSnapshot};
pub use rename_spec::{IconSet, Identity, RenameSpec};
pub use report::{
    FileChangeRecord, FileOutcome, IconOutcome, RenamePhase, RunSummary, RunWarning, TreeReport,
};
pub use substitution::{Substituted, SubstitutionPlan, SubstitutionRule};
