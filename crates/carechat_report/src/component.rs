//! The component contract.

use async_trait::async_trait;
use carechat_session::SessionHandle;

use crate::error::ReportResult;
use crate::section::{SectionKind, SectionRecord};

/// A data-producing unit responsible for one report section.
///
/// Components are independent: a component never reads another
/// component's output and makes no assumption about when its siblings run.
#[async_trait]
pub trait Component: Send + Sync {
    /// Section this component produces.
    fn kind(&self) -> SectionKind;

    /// Display title of the section.
    fn title(&self) -> String {
        self.kind().default_title().to_string()
    }

    fn description(&self) -> &str {
        ""
    }

    /// Critical sections cannot be left out of a report. When one fails
    /// because the session data is unreachable, generation aborts instead of
    /// substituting a placeholder.
    fn is_critical(&self) -> bool {
        false
    }

    /// Produce this component's section for a session.
    async fn generate(&self, session: &SessionHandle) -> ReportResult<SectionRecord>;
}
