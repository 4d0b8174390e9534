//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Declaration;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut declaration: Declaration) -> Result<Declaration, ProjectError> {
    while declaration.version < LATEST_VERSION {
        declaration = migrate_one_version(declaration)?;
    }
    Ok(declaration)
}

fn migrate_one_version(declaration: Declaration) -> Result<Declaration, ProjectError> {
    match declaration.version {
        0 => migrate_v0_to_v1(declaration),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Unversioned declarations spelled thrust curves with capitalized names
/// (`Thrust`, `Power`); v1 stores them lowercase.
fn migrate_v0_to_v1(mut declaration: Declaration) -> Result<Declaration, ProjectError> {
    if let crate::schema::BatchDef::ThrustCurve(thrust) = &mut declaration.batch {
        for curve in &mut thrust.curves {
            *curve = curve.trim().to_ascii_lowercase();
        }
    }
    declaration.version = 1;
    Ok(declaration)
}
