// (C) Copyright IBM Corp. 2025.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use log::{debug, warn};

use super::flag_descriptor::{FlagDescriptor, Variation};
use crate::models::{Flag, Snapshot, VariantType};
use crate::snapshot_store::SnapshotStore;
use crate::targeting::{self, EvaluationError};
use crate::telemetry::TelemetryAggregator;
use crate::{Entity, Value};

/// Evaluates flags against the current snapshot and records every outcome.
///
/// Evaluation never fails: whatever goes wrong, the caller gets the
/// descriptor's default variation and the failure is counted.
#[derive(Debug)]
pub(crate) struct Evaluator {
    store: Arc<SnapshotStore>,
    telemetry: Arc<TelemetryAggregator>,
}

impl Evaluator {
    pub(crate) fn new(store: Arc<SnapshotStore>, telemetry: Arc<TelemetryAggregator>) -> Self {
        Self { store, telemetry }
    }

    pub(crate) fn evaluate(
        &self,
        descriptor: &FlagDescriptor,
        entity: &impl Entity,
        expected: VariantType,
    ) -> Variation {
        let snapshot = self.store.get_snapshot();

        let (flag, key) = match resolve(&snapshot, descriptor, entity, expected) {
            Ok(resolved) => resolved,
            Err(e) => return self.fall_back(descriptor, &e),
        };

        match variant_value(flag, &key, expected) {
            Ok(value) => {
                self.telemetry.record_evaluation(&descriptor.flag_id, &key);
                Variation { key, value }
            }
            Err(e) => {
                warn!(
                    "Variant '{key}' of flag '{}' cannot be served: {e}",
                    descriptor.flag_id
                );
                self.telemetry.record_code_bug(&descriptor.flag_id, &key);
                self.fall_back(descriptor, &e)
            }
        }
    }

    fn fall_back(&self, descriptor: &FlagDescriptor, error: &EvaluationError) -> Variation {
        debug!(
            "Serving default '{}' for flag '{}': {error}",
            descriptor.default_key, descriptor.flag_id
        );
        self.telemetry
            .record_evaluation(&descriptor.flag_id, &descriptor.default_key);
        self.telemetry.record_error(&descriptor.flag_id);
        descriptor.default_variation()
    }
}

fn resolve<'s>(
    snapshot: &'s Snapshot,
    descriptor: &FlagDescriptor,
    entity: &impl Entity,
    expected: VariantType,
) -> Result<(&'s Flag, String), EvaluationError> {
    if !snapshot.is_loaded() {
        return Err(EvaluationError::NotInitialized);
    }

    let user_id = entity.get_id();
    if user_id.trim().is_empty() {
        return Err(EvaluationError::BlankUserId);
    }

    let flag = snapshot
        .get_flag(&descriptor.flag_id)
        .ok_or_else(|| EvaluationError::FlagNotFound(descriptor.flag_id.clone()))?;

    if flag.kind != Some(expected) {
        return Err(EvaluationError::TypeMismatch {
            flag_id: flag.id.clone(),
            found: flag
                .kind
                .map_or_else(|| "unknown".to_string(), |kind| kind.to_string()),
            requested: expected,
        });
    }

    let attributes = entity.get_attributes();
    let key = targeting::resolve_variant(flag, snapshot.segments(), &user_id, &attributes)?;
    Ok((flag, key))
}

fn variant_value(flag: &Flag, key: &str, expected: VariantType) -> Result<Value, EvaluationError> {
    let raw = flag
        .variants
        .get(key)
        .ok_or_else(|| EvaluationError::UnknownVariant {
            flag_id: flag.id.clone(),
            variant: key.to_string(),
        })?;
    Ok(Value::coerce(expected, raw)?)
}
