// Mirrors the externally owned schema, keep in sync with `diesel print-schema`.

diesel::table! {
    todos (id) {
        id -> Int4,
        title -> Varchar,
        description -> Varchar,
        priority -> Int4,
        complete -> Bool,
        owner_id -> Int4,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        hashed_password -> Varchar,
        is_active -> Bool,
        role -> Varchar,
        phone_number -> Nullable<Varchar>,
    }
}

diesel::joinable!(todos -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(todos, users,);
