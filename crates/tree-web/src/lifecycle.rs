// Page visibility transitions mapped to what the running app should do.
//
// `pagehide` with `persisted == true` means the page is entering the
// back/forward cache and may be shown again; only a non-persisted hide is a
// real teardown.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTransition {
    Hide { persisted: bool },
    Show { persisted: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Halt the frame loop and release the camera, keeping everything else.
    Suspend,
    /// Restart what `Suspend` halted.
    Resume,
    /// Release everything for good.
    Teardown,
    Ignore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageLifecycle {
    suspended: bool,
    torn_down: bool,
}

impl PageLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn on_transition(&mut self, transition: PageTransition) -> LifecycleAction {
        if self.torn_down {
            return LifecycleAction::Ignore;
        }
        match transition {
            PageTransition::Hide { persisted: false } => {
                self.torn_down = true;
                LifecycleAction::Teardown
            }
            PageTransition::Hide { persisted: true } if !self.suspended => {
                self.suspended = true;
                LifecycleAction::Suspend
            }
            // initial load fires a non-persisted pageshow
            PageTransition::Show { .. } if self.suspended => {
                self.suspended = false;
                LifecycleAction::Resume
            }
            _ => LifecycleAction::Ignore,
        }
    }
}
