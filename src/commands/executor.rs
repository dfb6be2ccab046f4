use std::future::Future;
use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CommandError;

/// Runs a command's unit of work and turns its outcome into an exit status.
///
/// The unit of work does its own printing. The executor only decides how the
/// invocation ends: success, a reported failure, or an interruption when the
/// cancellation token fires first.
#[derive(Clone, Default)]
pub struct Executor {
    cancel: CancellationToken,
}

impl Executor {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Run `work` until it completes or the invocation is cancelled
    pub async fn execute<F>(&self, work: F) -> Result<(), CommandError>
    where
        F: Future<Output = Result<(), CommandError>>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!("Command cancelled");
                Err(CommandError::Interrupted)
            }
            result = work => result,
        }
    }
}

/// Print a failure, if any, and return the process exit status
pub fn report(result: Result<(), CommandError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::time::Duration;

    #[tokio::test]
    async fn success_passes_through() {
        let executor = Executor::default();
        assert!(executor.execute(async { Ok::<_, CommandError>(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn remote_failure_is_reported_once() {
        let executor = Executor::default();
        let mut attempts = 0;
        let result = executor
            .execute(async {
                attempts += 1;
                Err::<(), _>(CommandError::from(ApiError::NotFound("/products/1".to_string())))
            })
            .await;

        assert!(matches!(
            result,
            Err(CommandError::Remote(ApiError::NotFound(_)))
        ));
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn cancellation_interrupts_blocked_work() {
        let cancel = CancellationToken::new();
        let executor = Executor::new(cancel.clone());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });

        let result = executor
            .execute(async {
                std::future::pending::<()>().await;
                Ok::<_, CommandError>(())
            })
            .await;
        assert!(matches!(result, Err(CommandError::Interrupted)));
    }

    #[tokio::test]
    async fn cancelled_before_start_never_reports_remote_error() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let executor = Executor::new(cancel);

        let result = executor
            .execute(async { Err::<(), _>(CommandError::from(ApiError::Timeout)) })
            .await;
        assert!(matches!(result, Err(CommandError::Interrupted)));
    }

    #[tokio::test]
    async fn interruption_from_work_is_kept() {
        let executor = Executor::default();
        let result = executor
            .execute(async { Err::<(), _>(CommandError::Interrupted) })
            .await;
        assert!(matches!(result, Err(CommandError::Interrupted)));
    }

    #[test]
    fn exit_status() {
        assert_eq!(CommandError::Validation("name".to_string()).exit_status(), 1);
        assert_eq!(CommandError::from(ApiError::Unauthorized).exit_status(), 1);
        assert_eq!(CommandError::Interrupted.exit_status(), 130);
    }
}
