//! Role-scoped data access. Plain authenticated CRUD over [`ApiClient`].

mod beneficiary;
mod donator;

pub use beneficiary::BeneficiaryService;
pub use donator::DonatorService;

use crate::client::ApiClient;
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    pub fn donator(&self) -> DonatorService<'_, T> {
        DonatorService::new(self)
    }

    pub fn beneficiary(&self) -> BeneficiaryService<'_, T> {
        BeneficiaryService::new(self)
    }
}
