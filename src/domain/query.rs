// Pure transforms over store snapshots: filtering, search, pagination.
// No side effects; the routes feed these with freshly read collections.

use crate::domain::{Availability, RequestStatus, SwapRequest, UserProfile};

pub const DIRECTORY_PAGE_SIZE: usize = 6;
pub const REQUESTS_PAGE_SIZE: usize = 5;

/// One page of a filtered collection. Pages are 1-indexed and the requested
/// page number is clamped into the valid range, so `page` is always
/// renderable even when the caller asked for page 0 or past the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> usize {
        (self.page + 1).min(self.total_pages.max(1))
    }

    pub fn numbers(&self) -> Vec<PageNumber> {
        (1..=self.total_pages)
            .map(|value| PageNumber {
                value,
                current: value == self.page,
            })
            .collect()
    }
}

/// One entry of the pagination bar, precomputed for the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber {
    pub value: usize,
    pub current: bool,
}

pub fn paginate<T>(items: Vec<T>, requested_page: usize, per_page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = requested_page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// Availability filter for the browse view: exact match or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Only(Availability),
}

impl AvailabilityFilter {
    pub fn parse(s: &str) -> Self {
        match s.parse::<Availability>() {
            Ok(a) if a.is_set() => AvailabilityFilter::Only(a),
            _ => AvailabilityFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityFilter::All => "all",
            AvailabilityFilter::Only(a) => a.as_str(),
        }
    }

    fn matches(&self, profile: &UserProfile) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Only(a) => profile.availability == *a,
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Directory browse: drop the viewer's own profile and private profiles,
/// then search name and both skill lists case-insensitively, then filter by
/// availability, then slice one page.
pub fn browse_directory(
    profiles: Vec<UserProfile>,
    viewer_id: Option<&str>,
    search: &str,
    availability: AvailabilityFilter,
    page: usize,
) -> Page<UserProfile> {
    let search = search.trim();
    let matching: Vec<UserProfile> = profiles
        .into_iter()
        .filter(|p| viewer_id != Some(p.id.as_str()))
        .filter(|p| p.is_public)
        .filter(|p| {
            search.is_empty()
                || contains_ci(&p.name, search)
                || p.skills_offered.iter().any(|s| contains_ci(s, search))
                || p.skills_wanted.iter().any(|s| contains_ci(s, search))
        })
        .filter(|p| availability.matches(p))
        .collect();

    paginate(matching, page, DIRECTORY_PAGE_SIZE)
}

/// Status filter for the inbox: exact match or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Self {
        match s.parse::<RequestStatus>() {
            Ok(status) => StatusFilter::Only(status),
            Err(()) => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(s) => s.as_str(),
        }
    }

    fn matches(&self, request: &SwapRequest) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => request.status == *s,
        }
    }
}

/// A swap request joined with the viewer's counterpart profile.
#[derive(Debug, Clone)]
pub struct InboxEntry {
    pub request: SwapRequest,
    pub other: UserProfile,
    pub is_requester: bool,
}

impl InboxEntry {
    pub fn can_decide(&self) -> bool {
        !self.is_requester && self.request.status == RequestStatus::Pending
    }

    pub fn can_cancel(&self) -> bool {
        self.is_requester && self.request.status == RequestStatus::Pending
    }

    pub fn can_delete(&self) -> bool {
        self.request.status == RequestStatus::Rejected
    }

    pub fn sent_or_received(&self) -> &'static str {
        if self.is_requester {
            "Sent"
        } else {
            "Received"
        }
    }

    pub fn created_on(&self) -> String {
        self.request.created_at.format("%b %-d, %Y").to_string()
    }
}

/// Inbox listing: keep requests where the viewer is either party, resolve
/// the other party's profile (entries with a dangling reference are
/// skipped), apply status and search filters, slice one page.
pub fn inbox(
    requests: Vec<SwapRequest>,
    profiles: &[UserProfile],
    viewer_id: &str,
    status: StatusFilter,
    search: &str,
    page: usize,
) -> Page<InboxEntry> {
    let search = search.trim();
    let matching: Vec<InboxEntry> = requests
        .into_iter()
        .filter(|r| r.requester_id == viewer_id || r.target_user_id == viewer_id)
        .filter(|r| status.matches(r))
        .filter_map(|request| {
            let is_requester = request.requester_id == viewer_id;
            let other_id = if is_requester {
                &request.target_user_id
            } else {
                &request.requester_id
            };
            let other = profiles.iter().find(|p| &p.id == other_id)?.clone();
            Some(InboxEntry {
                request,
                other,
                is_requester,
            })
        })
        .filter(|entry| {
            search.is_empty()
                || contains_ci(&entry.other.name, search)
                || contains_ci(&entry.request.offered_skill, search)
                || contains_ci(&entry.request.wanted_skill, search)
        })
        .collect();

    paginate(matching, page, REQUESTS_PAGE_SIZE)
}
