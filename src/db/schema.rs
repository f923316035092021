//! Database schema definitions
//!
//! Table and column names follow the upstream HR data model; dashboards in
//! the field run against variations of these tables, which is why the
//! aggregator probes `information_schema` instead of trusting this DDL.

pub const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id SERIAL PRIMARY KEY,
    employee_code TEXT UNIQUE,
    employee_name TEXT,
    email TEXT,
    mobile_number TEXT,
    page_access JSONB,
    department TEXT,
    designation TEXT,
    role TEXT,
    status TEXT,
    password TEXT,
    profile_img TEXT,
    document_img TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_LEAVE_REQUEST: &str = r#"
CREATE TABLE IF NOT EXISTS leave_request (
    id SERIAL PRIMARY KEY,
    employee_id INTEGER,
    employee_name TEXT,
    designation TEXT,
    department TEXT,
    from_date DATE,
    to_date DATE,
    reason TEXT,
    request_status TEXT,
    approved_by TEXT,
    approved_by_status TEXT,
    hr_approval TEXT,
    approval_hr TEXT,
    mobilenumber TEXT,
    urgent_mobilenumber TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

// Travel requests. request_no is issued as T-0001 style at insert time.
pub const CREATE_REQUEST: &str = r#"
CREATE TABLE IF NOT EXISTS request (
    id SERIAL PRIMARY KEY,
    request_no TEXT,
    employee_code TEXT,
    person_name TEXT,
    type_of_travel TEXT,
    reason_for_travel TEXT,
    no_of_person INTEGER,
    from_date DATE,
    to_date DATE,
    departure_date DATE,
    requester_name TEXT,
    requester_designation TEXT,
    requester_department TEXT,
    request_for TEXT,
    request_quantity INTEGER,
    experience TEXT,
    education TEXT,
    remarks TEXT,
    request_status TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_TICKET_BOOK: &str = r#"
CREATE TABLE IF NOT EXISTS ticket_book (
    id SERIAL PRIMARY KEY,
    bill_number TEXT,
    travels_name TEXT,
    type_of_bill TEXT,
    charges DOUBLE PRECISION,
    per_ticket_amount DOUBLE PRECISION,
    total_amount DOUBLE PRECISION,
    status TEXT,
    upload_bill_image TEXT,
    person_name TEXT,
    booked_name TEXT,
    request_employee_code TEXT,
    booked_employee_code TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_RESUME: &str = r#"
CREATE TABLE IF NOT EXISTS resume (
    id SERIAL PRIMARY KEY,
    candidate_name TEXT,
    candidate_email TEXT,
    candidate_mobile TEXT,
    applied_for_designation TEXT,
    req_id TEXT,
    experience TEXT,
    previous_company TEXT,
    previous_salary TEXT,
    reason_for_changing TEXT,
    marital_status TEXT,
    reference TEXT,
    address_present TEXT,
    resume TEXT,
    interviewer_planned TEXT,
    interviewer_actual TEXT,
    interviewer_status TEXT,
    candidate_status TEXT,
    joined_status TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

pub const CREATE_PLANT_VISITOR: &str = r#"
CREATE TABLE IF NOT EXISTS plant_visitor (
    id SERIAL PRIMARY KEY,
    person_name TEXT,
    employee_code TEXT,
    reason_for_visit TEXT,
    no_of_person INTEGER,
    from_date DATE,
    to_date DATE,
    requester_name TEXT,
    approv_employee_code TEXT,
    approve_by_name TEXT,
    request_for TEXT,
    remarks TEXT,
    request_status TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

// === INDEXES (optimized for dashboard aggregation) ===

pub const CREATE_INDEX_EMPLOYEES_STATUS: &str =
    "CREATE INDEX IF NOT EXISTS idx_employees_status ON employees(LOWER(status))";

pub const CREATE_INDEX_EMPLOYEES_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_employees_created ON employees(created_at)";

pub const CREATE_INDEX_LEAVE_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_leave_request_created ON leave_request(created_at)";

pub const CREATE_INDEX_REQUEST_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_request_created ON request(created_at)";

pub const CREATE_INDEX_TICKET_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_ticket_book_created ON ticket_book(created_at)";

pub const CREATE_INDEX_RESUME_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_resume_created ON resume(created_at)";

pub const CREATE_INDEX_VISITOR_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_plant_visitor_created ON plant_visitor(created_at)";
