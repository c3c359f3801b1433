use chrono::Utc;
use tokio::sync::watch;

use crate::domain::{RequestStatus, SwapRequest};
use crate::error::AppResult;
use crate::kv::SharedKv;
use crate::store::{read_collection, write_collection, SWAP_REQUESTS_KEY};

/// Fields the requester supplies; id, status and timestamp are synthesized.
#[derive(Debug, Clone)]
pub struct NewSwapRequest {
    pub requester_id: String,
    pub target_user_id: String,
    pub offered_skill: String,
    pub wanted_skill: String,
    pub message: String,
}

/// The collection of swap requests. Note what this store does NOT do:
/// `create` does not verify the skills appear in either profile's lists, and
/// `update_status` neither checks the caller nor the pending precondition.
/// Both checks live in the route handlers; see DESIGN.md.
#[derive(Clone)]
pub struct RequestStore {
    kv: SharedKv,
    snapshot: watch::Sender<Vec<SwapRequest>>,
}

impl RequestStore {
    pub fn new(kv: SharedKv) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self { kv, snapshot }
    }

    /// All requests in insertion order, newest last.
    pub fn list(&self) -> AppResult<Vec<SwapRequest>> {
        read_collection(&self.kv, SWAP_REQUESTS_KEY)
    }

    pub fn find(&self, id: &str) -> AppResult<Option<SwapRequest>> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<SwapRequest>> {
        self.snapshot.subscribe()
    }

    /// Append a new pending request stamped with the current time.
    pub fn create(&self, new: NewSwapRequest) -> AppResult<SwapRequest> {
        let request = SwapRequest {
            id: uuid::Uuid::now_v7().to_string(),
            requester_id: new.requester_id,
            target_user_id: new.target_user_id,
            offered_skill: new.offered_skill,
            wanted_skill: new.wanted_skill,
            message: new.message,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };

        let mut requests = self.list()?;
        requests.push(request.clone());
        write_collection(&self.kv, SWAP_REQUESTS_KEY, &requests)?;
        self.snapshot.send_replace(requests);
        Ok(request)
    }

    /// Overwrite the status of the matching request unconditionally. An
    /// unknown id is a silent no-op.
    pub fn update_status(&self, id: &str, status: RequestStatus) -> AppResult<()> {
        let mut requests = self.list()?;
        if let Some(request) = requests.iter_mut().find(|r| r.id == id) {
            request.status = status;
            write_collection(&self.kv, SWAP_REQUESTS_KEY, &requests)?;
            self.snapshot.send_replace(requests);
        }
        Ok(())
    }

    /// Remove the matching request. An unknown id is a silent no-op.
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let mut requests = self.list()?;
        let before = requests.len();
        requests.retain(|r| r.id != id);
        if requests.len() != before {
            write_collection(&self.kv, SWAP_REQUESTS_KEY, &requests)?;
            self.snapshot.send_replace(requests);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use std::sync::Arc;

    fn store() -> RequestStore {
        RequestStore::new(Arc::new(MemoryKv::new()))
    }

    fn new_request(requester: &str, target: &str) -> NewSwapRequest {
        NewSwapRequest {
            requester_id: requester.to_string(),
            target_user_id: target.to_string(),
            offered_skill: "Python".to_string(),
            wanted_skill: "Guitar".to_string(),
            message: "let's swap".to_string(),
        }
    }

    #[test]
    fn create_yields_pending_with_fresh_id() {
        let requests = store();
        let created = requests.create(new_request("a", "b")).unwrap();

        assert_eq!(created.status, RequestStatus::Pending);
        assert!(uuid::Uuid::parse_str(&created.id).is_ok());
        assert_eq!(requests.list().unwrap().len(), 1);
    }

    #[test]
    fn created_at_never_decreases_within_a_store() {
        let requests = store();
        let first = requests.create(new_request("a", "b")).unwrap();
        let second = requests.create(new_request("a", "c")).unwrap();

        assert!(second.created_at >= first.created_at);
        // Insertion order, newest last
        let ids: Vec<String> = requests.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn update_status_overwrites_unconditionally() {
        let requests = store();
        let created = requests.create(new_request("a", "b")).unwrap();

        requests
            .update_status(&created.id, RequestStatus::Accepted)
            .unwrap();
        assert_eq!(
            requests.find(&created.id).unwrap().unwrap().status,
            RequestStatus::Accepted
        );

        // The store itself enforces no pending-only precondition
        requests
            .update_status(&created.id, RequestStatus::Rejected)
            .unwrap();
        assert_eq!(
            requests.find(&created.id).unwrap().unwrap().status,
            RequestStatus::Rejected
        );
    }

    #[test]
    fn update_status_of_unknown_id_is_a_silent_no_op() {
        let requests = store();
        requests
            .update_status("ghost", RequestStatus::Accepted)
            .unwrap();
        assert!(requests.list().unwrap().is_empty());
    }

    #[test]
    fn double_delete_is_a_no_op_the_second_time() {
        let requests = store();
        let created = requests.create(new_request("a", "b")).unwrap();

        requests.delete(&created.id).unwrap();
        assert!(requests.list().unwrap().is_empty());

        requests.delete(&created.id).unwrap();
        assert!(requests.list().unwrap().is_empty());
    }

    #[test]
    fn mutations_publish_snapshots() {
        let requests = store();
        let mut rx = requests.subscribe();

        let created = requests.create(new_request("a", "b")).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        requests.delete(&created.id).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());

        // A no-op delete publishes nothing
        requests.delete(&created.id).unwrap();
        assert!(!rx.has_changed().unwrap());
    }
}
