//! Offline explanations for common Python exceptions

use crate::assist::types::ErrorExplanation;

/// One row of the offline error table
#[derive(Debug, Clone, Copy)]
pub struct ErrorEntry {
    pub error_type: &'static str,
    pub explanation: &'static str,
    pub suggestion: &'static str,
    pub example: &'static str,
}

impl ErrorEntry {
    pub fn to_explanation(&self) -> ErrorExplanation {
        ErrorExplanation::new(self.error_type, self.explanation, self.suggestion, self.example)
    }
}

/// Checked in order; the first name contained in the message wins.
/// `ModuleNotFoundError` does not contain `ImportError`, so both can match.
pub static ERROR_TABLE: [ErrorEntry; 13] = [
    ErrorEntry {
        error_type: "IndexError",
        explanation: "You're trying to access an index that doesn't exist. Remember: Python uses 0-based indexing!",
        suggestion: "Check list length before accessing: if index < len(my_list):",
        example: "my_list = [1, 2, 3]  # Valid indices: 0, 1, 2",
    },
    ErrorEntry {
        error_type: "KeyError",
        explanation: "The dictionary doesn't have this key. This is like looking for a word that's not in the dictionary.",
        suggestion: "Use .get() method: my_dict.get('key', default_value)",
        example: "data = {'a': 1}  # Use data.get('b', 0) instead of data['b']",
    },
    ErrorEntry {
        error_type: "TypeError",
        explanation: "You're using an operation with incompatible types. Like trying to add a string and a number.",
        suggestion: "Convert types: int(string_var) or str(number_var)",
        example: "'5' + 3  # Error!  Use int('5') + 3  # Correct: 8",
    },
    ErrorEntry {
        error_type: "ValueError",
        explanation: "The value has the right type but an inappropriate value.",
        suggestion: "Validate input before conversion or use try-except",
        example: "try: x = int(user_input) except ValueError: print('Enter a number')",
    },
    ErrorEntry {
        error_type: "NameError",
        explanation: "This variable or function name doesn't exist. Maybe a typo?",
        suggestion: "Check spelling, ensure variable is defined before use",
        example: "x = 5  # Define first, then print(x)",
    },
    ErrorEntry {
        error_type: "ZeroDivisionError",
        explanation: "Cannot divide by zero! This is mathematically undefined.",
        suggestion: "Add a check before division",
        example: "if divisor != 0: result = numerator / divisor",
    },
    ErrorEntry {
        error_type: "AttributeError",
        explanation: "This object doesn't have the attribute or method you're trying to use.",
        suggestion: "Check the object's type with type() or use hasattr()",
        example: "my_list = [1, 2, 3]  # my_list.append(4) not my_list.push(4)",
    },
    ErrorEntry {
        error_type: "ImportError",
        explanation: "Cannot import this module. It might not be installed.",
        suggestion: "Install with pip or check the module name",
        example: "# pip install requests then import requests",
    },
    ErrorEntry {
        error_type: "ModuleNotFoundError",
        explanation: "Python can't find this module. You need to install it first.",
        suggestion: "Use the Pip menu to install: pip install <module_name>",
        example: "# Tap Pip button, type 'numpy', and install",
    },
    ErrorEntry {
        error_type: "SyntaxError",
        explanation: "Your code has a grammar mistake. Like a sentence without proper punctuation!",
        suggestion: "Check for missing colons, parentheses, or quotes",
        example: "# Wrong: if x == 5  # Right: if x == 5:",
    },
    ErrorEntry {
        error_type: "IndentationError",
        explanation: "Python uses indentation to define code blocks. Yours is wrong!",
        suggestion: "Use 4 spaces consistently. Don't mix tabs and spaces.",
        example: "def my_function():  # 4 spaces here  print('Hello')",
    },
    ErrorEntry {
        error_type: "RecursionError",
        explanation: "Your function called itself too many times. It went in circles!",
        suggestion: "Add a base case to stop recursion",
        example: "def factorial(n): if n <= 1: return 1  # Base case",
    },
    ErrorEntry {
        error_type: "FileNotFoundError",
        explanation: "The file you're trying to open doesn't exist at that path.",
        suggestion: "Check the file path, or create the file first",
        example: "import os  if os.path.exists('file.txt'): open it",
    },
];

/// Returned when no table entry matches
pub static UNKNOWN_ERROR: ErrorEntry = ErrorEntry {
    error_type: "Unknown",
    explanation: "An unexpected error occurred. This might be a runtime issue or logic error.",
    suggestion: "Try breaking your code into smaller parts to identify the issue.",
    example: "# Use print statements to debug",
};

/// Look up an error message in the offline table
pub fn explain_error_locally(message: &str) -> ErrorExplanation {
    ERROR_TABLE
        .iter()
        .find(|entry| message.contains(entry.error_type))
        .unwrap_or(&UNKNOWN_ERROR)
        .to_explanation()
}
