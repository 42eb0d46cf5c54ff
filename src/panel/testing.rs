use super::{client::UsersApi, errors::AppError};
use crate::model::{MessageBody, User};
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(String),
    Update(u64, String),
    Delete(u64),
}

/// In-memory backend that records every call.
#[derive(Debug)]
pub struct FakeUsersApi {
    users: RefCell<Vec<User>>,
    next_id: Cell<u64>,
    calls: RefCell<Vec<Call>>,
    list_failure: RefCell<Option<AppError>>,
    mutation_failure: RefCell<Option<AppError>>,
}

impl FakeUsersApi {
    pub fn with_users(names: &[&str]) -> Self {
        let users: Vec<User> = names
            .iter()
            .zip(1..)
            .map(|(name, id)| User {
                id,
                name: (*name).to_string(),
            })
            .collect();
        let next_id = users.len() as u64 + 1;

        Self {
            users: RefCell::new(users),
            next_id: Cell::new(next_id),
            calls: RefCell::new(Vec::new()),
            list_failure: RefCell::new(None),
            mutation_failure: RefCell::new(None),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == Call::List)
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn fail_list(&self, err: Option<AppError>) {
        *self.list_failure.borrow_mut() = err;
    }

    pub fn fail_mutations(&self, err: Option<AppError>) {
        *self.mutation_failure.borrow_mut() = err;
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn mutation_result(&self) -> Result<(), AppError> {
        match self.mutation_failure.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found() -> AppError {
    AppError::Http {
        status: 404,
        message: "{\"error\":\"User not found\"}".to_string(),
    }
}

impl UsersApi for FakeUsersApi {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.record(Call::List);
        if let Some(err) = self.list_failure.borrow().clone() {
            return Err(err);
        }
        Ok(self.users.borrow().clone())
    }

    async fn create_user(&self, name: &str) -> Result<User, AppError> {
        self.record(Call::Create(name.to_string()));
        self.mutation_result()?;

        let user = User {
            id: self.next_id.get(),
            name: name.to_string(),
        };
        self.next_id.set(user.id + 1);
        self.users.borrow_mut().push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: u64, name: &str) -> Result<User, AppError> {
        self.record(Call::Update(id, name.to_string()));
        self.mutation_result()?;

        let mut users = self.users.borrow_mut();
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(not_found)?;
        user.name = name.to_string();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: u64) -> Result<MessageBody, AppError> {
        self.record(Call::Delete(id));
        self.mutation_result()?;

        let mut users = self.users.borrow_mut();
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Err(not_found());
        }
        Ok(MessageBody {
            message: "User deleted successfully".to_string(),
        })
    }
}
