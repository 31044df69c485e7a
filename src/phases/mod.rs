//! The stages of a bundle build.
//!
//! ## Overview
//!
//! A build is one linear pass:
//! 1. Stage - Copy `[root]` files and directories into the build tree
//! 2. Fetch - Reuse the cached library bundle or download it
//! 3. Extract - Copy requested libraries out of the bundle into `lib/`
//! 4. README - Record where the code and libraries came from
//! 5. Archive - Zip the tree and list its contents
//!
//! Reading the manifest, resolving repository metadata and creating the
//! build tree happen before stage 1; see [`orchestrator::execute`].
//!
//! Nothing runs concurrently and no stage is retried. A failing stage aborts
//! the build without cleaning up what earlier stages wrote.

pub mod archive;
pub mod extract;
pub mod fetch;
pub mod orchestrator;
pub mod readme;
pub mod stage;
