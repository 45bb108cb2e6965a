use super::*;
use crate::boot::{BootStage, SessionPhase, ShutdownStage};

const STARTUP_LOGO: &str = "/images/windows-xp-startup-logo.png";
const SHUTDOWN_LOGO: &str = "/images/windows-xp-shutdown-logo.png";

fn shutdown_message(stage: ShutdownStage) -> &'static str {
    match stage {
        ShutdownStage::SavingSettings => "Saving your settings...",
        ShutdownStage::ShuttingDown => "Shutting down...",
    }
}

/// Full-screen boot and shutdown screens shown while the desktop is unmounted.
#[component]
pub(super) fn SessionScreen() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let session = runtime.session;

    move || match session.get() {
        SessionPhase::Booting(BootStage::Logo) => view! {
            <div class="session-screen session-logo">
                <img src=STARTUP_LOGO alt="Windows XP" class="session-logo-pulse" />
            </div>
        }
        .into_view(),
        SessionPhase::Booting(BootStage::Progress(percent)) => view! {
            <div class="session-screen session-progress">
                <img src=STARTUP_LOGO alt="Windows XP" />
                <div
                    class="session-progress-track"
                    role="progressbar"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=percent
                >
                    <div class="session-progress-fill" style=format!("width:{percent}%;")></div>
                </div>
                <p>"Starting Windows..."</p>
            </div>
        }
        .into_view(),
        SessionPhase::Booting(BootStage::Welcome) => view! {
            <div class="session-screen session-welcome">
                <p>"Welcome to Windows XP"</p>
            </div>
        }
        .into_view(),
        SessionPhase::ShuttingDown(stage) => view! {
            <div class="session-screen session-shutdown">
                <img src=SHUTDOWN_LOGO alt="Windows XP" />
                <div class="session-progress-track session-progress-busy"></div>
                <p>{shutdown_message(stage)}</p>
            </div>
        }
        .into_view(),
        SessionPhase::Running => ().into_view(),
    }
}
