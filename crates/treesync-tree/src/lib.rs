//! Keeps a directory of sub-projects in canonical `NN_name` order and
//! regenerates the build descriptors that mirror it.
//!
//! The stages run strictly in sequence: [`DirectoryScanner`] →
//! [`NamingNormalizer`] → [`TreeRenamer`] → [`BuildFileSynthesizer`].
//! [`Pipeline`] wires them together for one invocation.

pub mod naming;
pub mod pipeline;
pub mod renamer;
pub mod scanner;
pub mod synthesizer;

pub use naming::{split_prefix, NamingNormalizer};
pub use pipeline::{Mode, Pipeline, PlanReport, RunSummary, VcsReport};
pub use renamer::{RenameOutcome, TreeRenamer};
pub use scanner::DirectoryScanner;
pub use synthesizer::{
    group_label, AggregateDescriptor, BuildFileSynthesizer, DescriptorWrite, LeafDescriptor,
    SynthesisReport,
};
