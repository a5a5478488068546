//! Checkout ledger manager.
//!
//! # Responsibility
//! - Track active checkouts in insertion order.
//! - Enforce at most one active checkout per ISBN.
//! - Derive overdue status and fines from due dates.
//!
//! # Invariants
//! - Per book: Available -> CheckedOut on `checkout`, back on `checkin`.
//! - Checkouts are accepted for books/users unknown to other managers.
//! - Fines are `max(days_overdue, 0) * fine_per_day` for overdue records only.

use crate::model::checkout::{CheckoutRecord, OverdueEntry};
use crate::model::dataset::DatasetSection;
use crate::service::{EntityKind, ManagerError, ManagerResult};
use crate::storage::DatasetStore;
use chrono::{Duration, Local, NaiveDateTime};
use log::{debug, info, warn};

/// Default loan length applied when no due date is given.
pub const DEFAULT_LOAN_DAYS: i64 = 14;
/// Default fine charged per whole overdue day.
pub const DEFAULT_FINE_PER_DAY: f64 = 0.5;

/// Loan length and fine rate used by a ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanPolicy {
    pub loan_period: Duration,
    pub fine_per_day: f64,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period: Duration::days(DEFAULT_LOAN_DAYS),
            fine_per_day: DEFAULT_FINE_PER_DAY,
        }
    }
}

/// Current local wall-clock time, matching how due dates are stored.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// In-memory checkout list synchronized with a `DatasetStore`.
pub struct CheckoutLedger<'s, S: DatasetStore + ?Sized> {
    store: &'s S,
    policy: LoanPolicy,
    checkouts: Vec<CheckoutRecord>,
}

impl<'s, S: DatasetStore + ?Sized> CheckoutLedger<'s, S> {
    /// Loads the `checkouts` section with the default loan policy.
    pub fn load(store: &'s S) -> ManagerResult<Self> {
        Self::with_policy(store, LoanPolicy::default())
    }

    pub fn with_policy(store: &'s S, policy: LoanPolicy) -> ManagerResult<Self> {
        let checkouts = store.read()?.checkouts;
        info!(
            "event=ledger_load module=checkouts status=ok count={} loan_days={} fine_per_day={}",
            checkouts.len(),
            policy.loan_period.num_days(),
            policy.fine_per_day
        );
        Ok(Self {
            store,
            policy,
            checkouts,
        })
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Records a loan of `isbn` to `user_id`.
    ///
    /// `due_date` defaults to now plus the policy loan period.
    ///
    /// # Errors
    /// - `DuplicateKey` when the book is already checked out.
    /// - `DueDateOutOfRange` when now plus the loan period overflows.
    /// - `Storage` when persisting fails.
    pub fn checkout(
        &mut self,
        user_id: impl Into<String>,
        isbn: impl Into<String>,
        due_date: Option<NaiveDateTime>,
    ) -> ManagerResult<CheckoutRecord> {
        let user_id = user_id.into();
        let isbn = isbn.into();

        if self.is_checked_out(&isbn) {
            warn!(
                "event=book_checkout module=checkouts status=rejected reason=already_checked_out isbn={isbn}"
            );
            return Err(ManagerError::duplicate(EntityKind::Checkout, isbn));
        }

        let due_date = match due_date {
            Some(due_date) => due_date,
            None => self.default_due_date(&isbn)?,
        };
        let record = CheckoutRecord::new(user_id, isbn, due_date);
        self.checkouts.push(record.clone());
        self.persist()?;
        info!(
            "event=book_checkout module=checkouts status=ok isbn={} user_id={} due_date={}",
            record.isbn, record.user_id, record.due_date
        );
        Ok(record)
    }

    /// Removes and returns the active checkout for `isbn`.
    pub fn checkin(&mut self, isbn: &str) -> ManagerResult<CheckoutRecord> {
        let Some(index) = self.checkouts.iter().position(|c| c.isbn == isbn) else {
            warn!(
                "event=book_checkin module=checkouts status=rejected reason=not_checked_out isbn={isbn}"
            );
            return Err(ManagerError::not_found(EntityKind::Checkout, isbn));
        };

        let removed = self.checkouts.remove(index);
        self.persist()?;
        info!("event=book_checkin module=checkouts status=ok isbn={isbn}");
        Ok(removed)
    }

    pub fn list_active(&self) -> &[CheckoutRecord] {
        &self.checkouts
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Option<&CheckoutRecord> {
        self.checkouts.iter().find(|c| c.isbn == isbn)
    }

    pub fn is_checked_out(&self, isbn: &str) -> bool {
        self.find_by_isbn(isbn).is_some()
    }

    /// Active checkouts whose due date is strictly before `as_of`.
    pub fn find_overdue(&self, as_of: NaiveDateTime) -> Vec<&CheckoutRecord> {
        self.checkouts
            .iter()
            .filter(|c| c.is_overdue(as_of))
            .collect()
    }

    pub fn find_overdue_now(&self) -> Vec<&CheckoutRecord> {
        self.find_overdue(local_now())
    }

    /// Overdue checkouts paired with whole days overdue at `as_of`.
    pub fn overdue_report(&self, as_of: NaiveDateTime) -> Vec<OverdueEntry> {
        self.find_overdue(as_of)
            .into_iter()
            .map(|record| OverdueEntry {
                record: record.clone(),
                days_overdue: record.days_overdue(as_of),
            })
            .collect()
    }

    /// Fine owed for `isbn` at `as_of`.
    ///
    /// Returns `None` when the book is not checked out or not overdue.
    pub fn calculate_fine(&self, isbn: &str, as_of: NaiveDateTime) -> Option<f64> {
        let Some(record) = self
            .find_by_isbn(isbn)
            .filter(|record| record.is_overdue(as_of))
        else {
            warn!(
                "event=fine_calculate module=checkouts status=skipped reason=not_overdue_or_not_found isbn={isbn}"
            );
            return None;
        };

        let days = record.days_overdue(as_of).max(0);
        let fine = days as f64 * self.policy.fine_per_day;
        debug!("event=fine_calculate module=checkouts status=ok isbn={isbn} days={days} fine={fine}");
        Some(fine)
    }

    pub fn calculate_fine_now(&self, isbn: &str) -> Option<f64> {
        self.calculate_fine(isbn, local_now())
    }

    pub fn len(&self) -> usize {
        self.checkouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkouts.is_empty()
    }

    fn default_due_date(&self, isbn: &str) -> ManagerResult<NaiveDateTime> {
        local_now()
            .checked_add_signed(self.policy.loan_period)
            .ok_or_else(|| {
                warn!(
                    "event=book_checkout module=checkouts status=rejected reason=due_date_out_of_range isbn={isbn} loan_days={}",
                    self.policy.loan_period.num_days()
                );
                ManagerError::DueDateOutOfRange {
                    isbn: isbn.to_string(),
                }
            })
    }

    fn persist(&self) -> ManagerResult<()> {
        self.store
            .write_section(DatasetSection::Checkouts(&self.checkouts))?;
        debug!(
            "event=checkouts_saved module=checkouts status=ok count={}",
            self.checkouts.len()
        );
        Ok(())
    }
}
