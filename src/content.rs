//! Fixed copy shown on each stage.

pub const APP_TITLE: &str = "System Verification Tool v2.4";

pub const LANDING_CHECKLIST: [(bool, &str); 3] = [
    (true, "Database Connection"),
    (true, "API Gateway Status"),
    (false, "User Verification Pending"),
];

pub const SCAN_HOSTS: [&str; 5] = [
    "auth.server.com",
    "api.gateway.io",
    "database.cluster.net",
    "cdn.content.org",
    "special.message.server",
];

pub const ENCRYPTED_CHUNKS: [&str; 5] = [
    "01110100 01100101 00100000 01100001 01101101 01101111 00100000 01110011 01101000 01100101 01111001 01110010 01100001",
    "WW91IGJl",
    "bXkgVmFs",
    "ZW50aW5l",
    "Pw==",
];

pub const RIDDLE_KEYWORD: &str = "valentine";

pub const RIDDLE: [&str; 4] = [
    "I come once a year, with hearts all around,",
    "Chocolates and flowers, love is found,",
    "Cupid shoots arrows, couples unite,",
    "What celebration is this? Get it right!",
];

pub const FINALE: [&str; 6] = [
    "Surprise!",
    "This wasn't really a work project...",
    "I built this entire app just to ask you one question:",
    "Will you be my Valentine?",
    "I really like you, and I wanted to do something special to show it.",
    "I hope this made you smile!",
];

pub const ACCEPT_REPLY: &str = "You've made me the happiest person!";
pub const PONDER_REPLY: &str = "That's okay! Take your time.";
