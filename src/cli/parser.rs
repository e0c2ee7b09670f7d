use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftpay
/// CLI application turning store attendance into payroll adjustments
#[derive(Parser)]
#[command(
    name = "shiftpay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance-to-payroll CLI: shift lateness, overtime and absences become payroll bonuses and deductions",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "recompute",
            help = "Re-derive lateness/early/overtime minutes of all stored attendance rows"
        )]
        recompute: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add, update or list roster entries
    Employee {
        #[arg(long = "add", help = "Create or update an employee", requires = "id")]
        add: bool,

        #[arg(long = "list", help = "List all employees", conflicts_with = "add")]
        list: bool,

        #[arg(long = "id", help = "Employee id")]
        id: Option<String>,

        #[arg(long = "name", help = "Display name")]
        name: Option<String>,

        #[arg(long = "role", help = "Role (free text)")]
        role: Option<String>,

        #[arg(long = "store", help = "Assigned store id (empty string to unassign)")]
        store: Option<String>,

        #[arg(long = "salary", help = "Monthly base salary")]
        salary: Option<i64>,
    },

    /// Set or show the shift schedule of a store
    Schedule {
        #[arg(
            long = "set",
            help = "Set one shift window",
            requires_all = ["store", "shift", "start", "end"]
        )]
        set: bool,

        #[arg(long = "show", help = "Show the resolved schedule", conflicts_with = "set")]
        show: bool,

        #[arg(long = "store", help = "Store id (omit with --show for the defaults)")]
        store: Option<String>,

        #[arg(long = "shift", help = "Shift: pagi, siang, malam (or P/S/M)")]
        shift: Option<String>,

        #[arg(long = "start", help = "Shift start (HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "Shift end (HH:MM, earlier than start = next day)")]
        end: Option<String>,
    },

    /// Record or edit the attendance of one employee on one day
    Attend {
        /// Employee id
        employee: String,

        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "shift", help = "Shift: pagi, siang, malam (detected from --in when omitted)")]
        shift: Option<String>,

        #[arg(long = "in", help = "Check-in time (HH:MM, '-' clears)")]
        check_in: Option<String>,

        #[arg(long = "out", help = "Check-out time (HH:MM, '-' clears)")]
        check_out: Option<String>,

        #[arg(long = "status", help = "Status: hadir, cuti, izin, sakit, alpha ('-' clears)")]
        status: Option<String>,

        #[arg(long = "notes", help = "Free-text notes")]
        notes: Option<String>,
    },

    /// Show the day-by-day attendance grid of one employee
    Grid {
        /// Employee id
        employee: String,

        #[arg(
            long,
            short,
            help = "Month (YYYY-MM), day (YYYY-MM-DD) or range (YYYY-MM-DD:YYYY-MM-DD); default: current month"
        )]
        period: Option<String>,
    },

    /// Derive bonus/deduction suggestions from a month of attendance
    Suggest {
        /// Employee id
        employee: String,

        #[arg(long = "month", help = "Payroll month (YYYY-MM)")]
        month: String,

        #[arg(long = "json", help = "Print suggestions as JSON")]
        json: bool,

        #[arg(long = "apply", help = "Merge the selected suggestions into the payroll record")]
        apply: bool,

        #[arg(
            long = "select",
            value_delimiter = ',',
            requires = "apply",
            help = "Suggestion ids to apply (default: all)"
        )]
        select: Option<Vec<String>>,

        #[arg(long = "store", help = "Store of the payroll record (default: the employee's)")]
        store: Option<String>,
    },

    /// Generate, list, edit and pay monthly payroll records
    Payroll {
        #[arg(long = "month", help = "Payroll month (YYYY-MM)")]
        month: String,

        #[arg(long = "generate", help = "Create or refresh records for every assigned employee")]
        generate: bool,

        #[arg(long = "list", help = "List the records of the month")]
        list: bool,

        #[arg(long = "employee", help = "Employee id (filter for --list, target for edits)")]
        employee: Option<String>,

        #[arg(long = "store", help = "Store id (default: the employee's)")]
        store: Option<String>,

        #[arg(long = "base", help = "Set the base salary")]
        base: Option<i64>,

        #[arg(long = "overtime-pay", help = "Set the overtime pay")]
        overtime_pay: Option<i64>,

        #[arg(long = "add-bonus", value_name = "NAME=AMOUNT", help = "Append a bonus")]
        add_bonus: Vec<String>,

        #[arg(long = "add-deduction", value_name = "NAME=AMOUNT", help = "Append a deduction")]
        add_deduction: Vec<String>,

        #[arg(long = "remove-bonus", value_name = "IDX", help = "Remove a bonus by 0-based index")]
        remove_bonus: Option<usize>,

        #[arg(
            long = "remove-deduction",
            value_name = "IDX",
            help = "Remove a deduction by 0-based index"
        )]
        remove_deduction: Option<usize>,

        #[arg(long = "pay", help = "Mark the record as paid")]
        pay: bool,
    },
}
