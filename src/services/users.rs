use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::{
    clock::Clock,
    models::{
        dashboard::{CheckInCalendar, Dashboard},
        users,
    },
    repositories::{session::SessionRepository, users::UserRepository, AccountError},
    storage::KeyValueStore,
};

pub enum UserRequest {
    SignUp {
        new_user: users::NewUser,
        response: oneshot::Sender<Result<users::User, ServiceError>>,
    },
    LogIn {
        credentials: users::Credentials,
        response: oneshot::Sender<Result<users::User, ServiceError>>,
    },
    LogOut {
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    CurrentUser {
        response: oneshot::Sender<Result<Option<users::User>, ServiceError>>,
    },
    CheckIn {
        response: oneshot::Sender<Result<users::User, ServiceError>>,
    },
    BuyPayId {
        response: oneshot::Sender<Result<Option<users::User>, ServiceError>>,
    },
    GetDashboard {
        response: oneshot::Sender<Result<Dashboard, ServiceError>>,
    },
    GetCalendar {
        response: oneshot::Sender<Result<CheckInCalendar, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct UserRequestHandler {
    repository: UserRepository,
    session: SessionRepository,
    clock: Arc<dyn Clock>,
}

impl UserRequestHandler {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let repository = UserRepository::new(store.clone(), clock.clone());
        let session = SessionRepository::new(store);

        UserRequestHandler {
            repository,
            session,
            clock,
        }
    }

    /// Creates the account and logs it in.
    pub fn sign_up(&self, new_user: users::NewUser) -> Result<users::User, ServiceError> {
        let name = new_user.name.trim();
        let email = new_user.email.trim();

        if name.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(AccountError::MissingFields.into());
        }

        let user = self
            .repository
            .insert_user(name, email, &new_user.password)
            .inspect_err(|e| log::warn!("Signup rejected for {}: {}", email, e))?;
        self.session.set_current_user_id(&user.id)?;

        Ok(user)
    }

    pub fn log_in(&self, credentials: users::Credentials) -> Result<users::User, ServiceError> {
        let email = credentials.email.trim();

        if email.is_empty() || credentials.password.is_empty() {
            return Err(AccountError::MissingFields.into());
        }

        let user = match self.repository.get_user_by_email(email)? {
            // Plain comparison; passwords are stored as typed.
            Some(user) if user.password == credentials.password => user,
            _ => {
                log::warn!("Failed login for {}", email);
                return Err(AccountError::InvalidCredentials.into());
            }
        };

        self.session.set_current_user_id(&user.id)?;
        log::info!("User {} logged in", user.id);

        Ok(user)
    }

    pub fn log_out(&self) -> Result<(), ServiceError> {
        self.session.clear_current_user()?;
        Ok(())
    }

    /// A session pointing at a record that no longer exists is dropped.
    pub fn current_user(&self) -> Result<Option<users::User>, ServiceError> {
        let user_id = match self.session.get_current_user_id()? {
            Some(user_id) => user_id,
            None => return Ok(None),
        };

        match self.repository.get_user_by_id(&user_id)? {
            Some(user) => Ok(Some(user)),
            None => {
                log::warn!("Session referenced missing user {}, clearing it", user_id);
                self.session.clear_current_user()?;
                Ok(None)
            }
        }
    }

    fn require_user(&self) -> Result<users::User, ServiceError> {
        self.current_user()?
            .ok_or_else(|| AccountError::NotLoggedIn.into())
    }

    pub fn check_in(&self) -> Result<users::User, ServiceError> {
        let user = self.require_user()?;
        let today = self.clock.today();

        let user = self.repository.check_in(&user.id, today)?;
        log::info!("User {} checked in on {}", user.id, today);

        Ok(user)
    }

    /// Flags the current user as having bought a Pay-ID. Nobody logged in is
    /// not an error; there is simply nothing to flag.
    pub fn buy_pay_id(&self) -> Result<Option<users::User>, ServiceError> {
        match self.current_user()? {
            Some(user) => Ok(Some(self.repository.set_has_pay_id(&user.id)?)),
            None => Ok(None),
        }
    }

    pub fn dashboard(&self) -> Result<Dashboard, ServiceError> {
        let user = self.require_user()?;
        Ok(Dashboard::for_user(&user, self.clock.today()))
    }

    pub fn calendar(&self) -> Result<CheckInCalendar, ServiceError> {
        let user = self.require_user()?;
        Ok(CheckInCalendar::for_month(&user, self.clock.today()))
    }
}

#[async_trait]
impl RequestHandler<UserRequest> for UserRequestHandler {
    async fn handle_request(&self, request: UserRequest) {
        match request {
            UserRequest::SignUp { new_user, response } => {
                let _ = response.send(self.sign_up(new_user));
            }
            UserRequest::LogIn {
                credentials,
                response,
            } => {
                let _ = response.send(self.log_in(credentials));
            }
            UserRequest::LogOut { response } => {
                let _ = response.send(self.log_out());
            }
            UserRequest::CurrentUser { response } => {
                let _ = response.send(self.current_user());
            }
            UserRequest::CheckIn { response } => {
                let _ = response.send(self.check_in());
            }
            UserRequest::BuyPayId { response } => {
                let _ = response.send(self.buy_pay_id());
            }
            UserRequest::GetDashboard { response } => {
                let _ = response.send(self.dashboard());
            }
            UserRequest::GetCalendar { response } => {
                let _ = response.send(self.calendar());
            }
        }
    }
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService {}
    }
}

#[async_trait]
impl Service<UserRequest, UserRequestHandler> for UserService {}
