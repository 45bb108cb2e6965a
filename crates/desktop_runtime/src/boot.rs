//! Session lifecycle: boot screens, the running desktop, and the shutdown sequence.
//!
//! The phase machine is pure; the shell component schedules each [`next_transition`] on a timer.

use std::time::Duration;

use crate::config::BootTimings;
use crate::sound::SoundKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStage {
    Logo,
    /// Progress bar fill in percent.
    Progress(u8),
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStage {
    SavingSettings,
    ShuttingDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Booting(BootStage),
    Running,
    ShuttingDown(ShutdownStage),
}

impl SessionPhase {
    /// The desktop and its windows exist only while running.
    pub fn desktop_mounted(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Cue played when the session enters this phase.
    pub fn entry_sound(self) -> Option<SoundKind> {
        match self {
            Self::Booting(BootStage::Logo) => Some(SoundKind::Startup),
            Self::ShuttingDown(ShutdownStage::SavingSettings) => Some(SoundKind::Shutdown),
            _ => None,
        }
    }

    /// Whether entering this phase starts from an empty window registry.
    pub fn resets_registry(self) -> bool {
        matches!(
            self,
            Self::Booting(BootStage::Logo) | Self::ShuttingDown(ShutdownStage::SavingSettings)
        )
    }
}

pub fn initial_phase(timings: &BootTimings) -> SessionPhase {
    if timings.skip_startup {
        SessionPhase::Running
    } else {
        SessionPhase::Booting(BootStage::Logo)
    }
}

/// Phase a shutdown request leads to. Requests outside the running desktop are ignored.
pub fn request_shutdown(phase: SessionPhase) -> Option<SessionPhase> {
    match phase {
        SessionPhase::Running => Some(SessionPhase::ShuttingDown(ShutdownStage::SavingSettings)),
        _ => None,
    }
}

/// Delay before the next phase and the phase itself. `Running` waits for user input.
pub fn next_transition(
    phase: SessionPhase,
    timings: &BootTimings,
) -> Option<(Duration, SessionPhase)> {
    let after = Duration::from_millis;
    match phase {
        SessionPhase::Booting(BootStage::Logo) => Some((
            after(timings.logo_ms),
            SessionPhase::Booting(BootStage::Progress(0)),
        )),
        SessionPhase::Booting(BootStage::Progress(percent)) if percent >= 100 => Some((
            after(timings.progress_settle_ms),
            SessionPhase::Booting(BootStage::Welcome),
        )),
        SessionPhase::Booting(BootStage::Progress(percent)) => {
            let step = timings.progress_step.max(1);
            Some((
                after(timings.progress_tick_ms),
                SessionPhase::Booting(BootStage::Progress(
                    percent.saturating_add(step).min(100),
                )),
            ))
        }
        SessionPhase::Booting(BootStage::Welcome) => {
            Some((after(timings.welcome_ms), SessionPhase::Running))
        }
        SessionPhase::Running => None,
        SessionPhase::ShuttingDown(ShutdownStage::SavingSettings) => Some((
            after(timings.saving_settings_ms),
            SessionPhase::ShuttingDown(ShutdownStage::ShuttingDown),
        )),
        SessionPhase::ShuttingDown(ShutdownStage::ShuttingDown) => {
            Some((after(timings.shutting_down_ms), initial_phase(timings)))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_until_running(timings: &BootTimings, from: SessionPhase) -> (Duration, usize) {
        let mut phase = from;
        let mut elapsed = Duration::ZERO;
        let mut steps = 0;
        while let Some((delay, next)) = next_transition(phase, timings) {
            elapsed += delay;
            steps += 1;
            phase = next;
            if phase == SessionPhase::Running {
                break;
            }
        }
        (elapsed, steps)
    }

    #[test]
    fn boot_sequence_reaches_running_after_all_stages() {
        let timings = BootTimings::default();
        let (elapsed, steps) = run_until_running(&timings, initial_phase(&timings));
        // logo, 50 progress ticks, settle, welcome
        assert_eq!(steps, 1 + 50 + 1 + 1);
        assert_eq!(elapsed, Duration::from_millis(2000 + 50 * 60 + 500 + 1000));
    }

    #[test]
    fn progress_never_overshoots() {
        let timings = BootTimings {
            progress_step: 30,
            ..BootTimings::default()
        };
        assert_eq!(
            next_transition(SessionPhase::Booting(BootStage::Progress(90)), &timings)
                .map(|(_, next)| next),
            Some(SessionPhase::Booting(BootStage::Progress(100)))
        );
    }

    #[test]
    fn shutdown_runs_both_stages_then_restarts() {
        let timings = BootTimings::default();
        assert_eq!(request_shutdown(SessionPhase::Booting(BootStage::Welcome)), None);
        let saving = request_shutdown(SessionPhase::Running).expect("shutdown");
        assert_eq!(saving.entry_sound(), Some(SoundKind::Shutdown));
        assert!(saving.resets_registry());

        let (delay, shutting) = next_transition(saving, &timings).expect("stage two");
        assert_eq!(delay, Duration::from_millis(2000));
        let (delay, restarted) = next_transition(shutting, &timings).expect("restart");
        assert_eq!(delay, Duration::from_millis(3000));
        assert_eq!(restarted, SessionPhase::Booting(BootStage::Logo));
        assert_eq!(restarted.entry_sound(), Some(SoundKind::Startup));
    }

    #[test]
    fn skipping_startup_boots_straight_to_desktop() {
        let timings = BootTimings {
            skip_startup: true,
            ..BootTimings::default()
        };
        assert_eq!(initial_phase(&timings), SessionPhase::Running);
        assert!(SessionPhase::Running.desktop_mounted());
        assert_eq!(next_transition(SessionPhase::Running, &timings), None);
        assert_eq!(
            next_transition(
                SessionPhase::ShuttingDown(ShutdownStage::ShuttingDown),
                &timings
            )
            .map(|(_, next)| next),
            Some(SessionPhase::Running)
        );
    }
}
