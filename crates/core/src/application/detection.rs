// Detection & Extraction Service
//
// Start -> ProbingFlash -> [hit] QueryingFlash -> Done
//          ProbingFlash -> [miss] ProbingDebug -> [hit] QueryingDebug -> Done
//                                  ProbingDebug -> [miss] NotConnected -> Done
use crate::domain::{
    lists_authorized_device, queries_for, DetectionError, DeviceRecord, FieldQuery, Mode,
    RawResponse, Tool, ToolConfig, PROBE_ARGS,
};
use crate::port::{CommandRunner, TimeProvider};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Snapshot produced by one detection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub mode: Mode,
    pub record: DeviceRecord,
    /// Set only when no device was found
    pub error: Option<DetectionError>,
    pub captured_at: DateTime<Utc>,
}

impl DetectionReport {
    /// Mode detected but at least one field could not be read
    pub fn is_partial(&self) -> bool {
        self.mode.is_connected() && self.record.len() < queries_for(self.mode).len()
    }

    /// Split into mode and record, or the terminal detection error
    pub fn into_result(self) -> crate::Result<(Mode, DeviceRecord)> {
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok((self.mode, self.record)),
        }
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Why a field did not make it into the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Tool missing, nonzero exit or timeout
    CommandFailed,
    EmptyResponse,
    /// Response lacked the expected `<token>: ` prefix
    PrefixMissing,
}

/// Progress notifications, emitted in run order
///
/// `FieldAdded` is emitted right after the append, so the fields an observer
/// has seen always form a prefix of the final record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionEvent {
    Probing(Tool),
    ModeDetected(Mode),
    FieldAdded {
        label: &'static str,
        value: String,
    },
    FieldSkipped {
        label: &'static str,
        reason: SkipReason,
    },
    Finished,
}

/// Detection & extraction engine
///
/// Holds no state between runs: every call builds a fresh record and
/// returns it by value. Invocations are issued strictly one at a time.
pub struct DetectionService {
    runner: Arc<dyn CommandRunner>,
    time_provider: Arc<dyn TimeProvider>,
    tools: ToolConfig,
}

impl DetectionService {
    /// Create a new detection service
    ///
    /// # Example
    /// ```ignore
    /// let service = DetectionService::new(
    ///     Arc::new(SubprocessRunner::new(None)),
    ///     Arc::new(SystemTimeProvider),
    ///     ToolConfig::default(),
    /// );
    /// let report = service.detect_and_extract().await;
    /// ```
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        time_provider: Arc<dyn TimeProvider>,
        tools: ToolConfig,
    ) -> Self {
        Self {
            runner,
            time_provider,
            tools,
        }
    }

    /// Detect the device mode and read that mode's fields
    pub async fn detect_and_extract(&self) -> DetectionReport {
        self.detect_and_extract_with_progress(|_| {}).await
    }

    /// Same as [`detect_and_extract`](Self::detect_and_extract), reporting each step
    pub async fn detect_and_extract_with_progress<F>(&self, mut on_event: F) -> DetectionReport
    where
        F: FnMut(&DetectionEvent) + Send,
    {
        let captured_at = self.time_provider.now();
        let mode = self.detect_mode(&mut on_event).await;
        on_event(&DetectionEvent::ModeDetected(mode));

        if !mode.is_connected() {
            info!("No device detected by fastboot or adb");
            on_event(&DetectionEvent::Finished);
            return DetectionReport {
                mode,
                record: DeviceRecord::new(),
                error: Some(DetectionError::NoDeviceDetected),
                captured_at,
            };
        }

        info!(mode = %mode, "Device detected, reading fields");

        let mut record = DeviceRecord::new();
        for query in queries_for(mode) {
            match self.read_field(query).await {
                Ok(value) => append_field(&mut record, query.label, value, &mut on_event),
                Err(reason) => {
                    on_event(&DetectionEvent::FieldSkipped {
                        label: query.label,
                        reason,
                    });
                }
            }
        }

        info!(
            mode = %mode,
            fields = record.len(),
            expected = queries_for(mode).len(),
            "Detection completed"
        );
        on_event(&DetectionEvent::Finished);

        DetectionReport {
            mode,
            record,
            error: None,
            captured_at,
        }
    }

    /// Flash probe first; the debug probe runs only if it misses
    async fn detect_mode<F>(&self, on_event: &mut F) -> Mode
    where
        F: FnMut(&DetectionEvent) + Send,
    {
        on_event(&DetectionEvent::Probing(Tool::Fastboot));
        if self.probe_flash().await {
            return Mode::FlashMode;
        }

        on_event(&DetectionEvent::Probing(Tool::Adb));
        if self.probe_debug().await {
            return Mode::DebugMode;
        }

        Mode::NotConnected
    }

    /// `fastboot devices` printing anything at all means a device is in flash mode
    async fn probe_flash(&self) -> bool {
        let invocation = self.tools.invocation(Tool::Fastboot, PROBE_ARGS);
        let hit = self.runner.run(&invocation).await.text().is_some();
        debug!(probe = %invocation, hit, "Flash-mode probe finished");
        hit
    }

    /// `adb devices` must list a device in the authorized `device` state
    async fn probe_debug(&self) -> bool {
        let invocation = self.tools.invocation(Tool::Adb, PROBE_ARGS);
        let hit = self
            .runner
            .run(&invocation)
            .await
            .text()
            .is_some_and(lists_authorized_device);
        debug!(probe = %invocation, hit, "Debug-mode probe finished");
        hit
    }

    async fn read_field(&self, query: &FieldQuery) -> Result<String, SkipReason> {
        let invocation = self.tools.invocation(query.tool, query.args);
        let response = self.runner.run(&invocation).await;

        let text = match (&response, response.text()) {
            (RawResponse::Absent, _) => {
                debug!(field = query.key, command = %invocation, "Field query failed");
                return Err(SkipReason::CommandFailed);
            }
            (_, None) => {
                debug!(field = query.key, command = %invocation, "Field query returned nothing");
                return Err(SkipReason::EmptyResponse);
            }
            (_, Some(text)) => text,
        };

        query.extractor.extract(text).ok_or_else(|| {
            warn!(
                field = query.key,
                command = %invocation,
                response = %text,
                "Unexpected response format, field dropped"
            );
            SkipReason::PrefixMissing
        })
    }
}

/// Append a field and announce it; a rejected append emits nothing
fn append_field<F>(
    record: &mut DeviceRecord,
    label: &'static str,
    value: String,
    on_event: &mut F,
) where
    F: FnMut(&DetectionEvent),
{
    if record.push(label, value.clone()) {
        on_event(&DetectionEvent::FieldAdded { label, value });
    } else {
        warn!(field = label, "Duplicate field label, value dropped");
    }
}
