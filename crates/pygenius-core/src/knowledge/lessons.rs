//! Built-in lesson catalogue used when lessons cannot be generated remotely

use crate::assist::types::{DifficultyLevel, Lesson, LessonType};

/// Static lessons keyed by topic and level
///
/// Only variables and loops vary by level. The other topics have a single
/// lesson with a fixed difficulty regardless of what was asked for.
#[derive(Debug, Default, Clone, Copy)]
pub struct LessonCatalog;

impl LessonCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn lesson(&self, kind: LessonType, level: DifficultyLevel) -> Lesson {
        match kind {
            LessonType::Variables => variables(level),
            LessonType::Loops => loops(level),
            LessonType::Functions => functions(),
            LessonType::Classes => classes(),
            LessonType::ListComprehension => list_comprehension(),
            LessonType::DataStructures => dictionaries(),
        }
    }

    /// Every distinct lesson in the catalogue
    pub fn all(&self) -> Vec<Lesson> {
        let mut lessons = vec![
            variables(DifficultyLevel::Beginner),
            variables(DifficultyLevel::Intermediate),
            loops(DifficultyLevel::Beginner),
            loops(DifficultyLevel::Intermediate),
            loops(DifficultyLevel::Advanced),
        ];
        lessons.extend([functions(), classes(), list_comprehension(), dictionaries()]);
        lessons
    }
}

fn lesson(
    title: &str,
    description: &str,
    code: &str,
    challenge: &str,
    hints: &[&str],
    solution: &str,
    difficulty: DifficultyLevel,
) -> Lesson {
    Lesson {
        title: title.to_string(),
        description: description.to_string(),
        code: code.to_string(),
        challenge: challenge.to_string(),
        hints: hints.iter().map(|hint| hint.to_string()).collect(),
        solution: solution.to_string(),
        difficulty,
    }
}

fn variables(level: DifficultyLevel) -> Lesson {
    match level {
        DifficultyLevel::Beginner => lesson(
            "Variables & Data Types",
            "Learn how to store and use data in Python",
            BASIC_VARIABLES_CODE,
            "Create variables for your favorite food, a price (with decimal), and whether you like it. Print them.",
            &[
                "Use quotes for text (string)",
                "Use numbers without quotes for integers",
                "Use True or False (capitalized) for boolean",
            ],
            VARIABLES_SOLUTION,
            level,
        ),
        _ => lesson(
            "Variable Unpacking",
            "Advanced variable assignment techniques",
            VAR_UNPACK_CODE,
            "Given coordinates = (10, 20, 30), unpack into x, y, z variables and print them.",
            &["Use: x, y, z = coordinates"],
            VAR_UNPACK_SOLUTION,
            DifficultyLevel::Intermediate,
        ),
    }
}

fn loops(level: DifficultyLevel) -> Lesson {
    match level {
        DifficultyLevel::Beginner => lesson(
            "For Loops",
            "Repeat actions efficiently with loops",
            BASIC_LOOPS_CODE,
            "Print numbers 1 to 10, then print 'Done!'",
            &[
                "Use range(1, 11) for 1 to 10",
                "The second number in range is exclusive",
            ],
            LOOPS_SOLUTION,
            level,
        ),
        DifficultyLevel::Intermediate => lesson(
            "Loop Patterns",
            "Common loop patterns every Python developer should know",
            INTERMEDIATE_LOOPS_CODE,
            "Given two lists: items = ['apple', 'banana'] and prices = [1.50, 0.75], print each item with its price.",
            &[
                "Use zip() to iterate both lists together",
                "Unpack with: for item, price in zip(items, prices)",
            ],
            INTERMEDIATE_LOOPS_SOLUTION,
            level,
        ),
        DifficultyLevel::Advanced => lesson(
            "Generator Expressions",
            "Memory-efficient iteration",
            GENERATOR_CODE,
            "Calculate sum of squares from 1 to 1000 using a generator expression.",
            &[
                "Use parentheses for generator: (x**2 for x in ...)",
                "Pass directly to sum()",
            ],
            GENERATOR_SOLUTION,
            level,
        ),
    }
}

fn functions() -> Lesson {
    lesson(
        "Functions",
        "Reusable blocks of code",
        FUNCTIONS_CODE,
        "Create a function 'square' that takes a number and returns its square. Test with square(5).",
        &[
            "Use def to define a function",
            "Use return to send back the result",
            "n ** 2 gives you n squared",
        ],
        FUNCTIONS_SOLUTION,
        DifficultyLevel::Beginner,
    )
}

fn classes() -> Lesson {
    lesson(
        "Classes & Objects",
        "Create your own data types",
        CLASSES_CODE,
        "Create a Rectangle class with width and height. Add a method 'area' that returns width * height.",
        &[
            "__init__ is the constructor method",
            "Use self.parameter to store instance variables",
        ],
        CLASSES_SOLUTION,
        DifficultyLevel::Intermediate,
    )
}

fn list_comprehension() -> Lesson {
    lesson(
        "List Comprehensions",
        "Pythonic way to create lists",
        LIST_COMP_CODE,
        "Convert this loop to a list comprehension: result = [] for x in range(20): if x % 3 == 0: result.append(x)",
        &[
            "Syntax: [expression for item in iterable if condition]",
            "The if comes at the end",
        ],
        LIST_COMP_SOLUTION,
        DifficultyLevel::Intermediate,
    )
}

fn dictionaries() -> Lesson {
    lesson(
        "Dictionaries",
        "Key-value data storage",
        DICT_CODE,
        "Create a phone book dictionary with 3 contacts. Write code to look up a phone number by name.",
        &[
            "Use curly braces: {'key': 'value'}",
            "Use .get() to avoid KeyError",
        ],
        DICT_SOLUTION,
        DifficultyLevel::Beginner,
    )
}

const BASIC_VARIABLES_CODE: &str = r#"
# Variables are containers for data
name = "Alice"      # String (text)
age = 25            # Integer (whole number)
height = 5.6        # Float (decimal)
is_student = True   # Boolean (True/False)

# Print the variables
print(f"{name} is {age} years old")
"#;

const VARIABLES_SOLUTION: &str = r#"
food = "Pizza"
price = 12.99
is_delicious = True
print(f"{food} costs ${price} and delicious={is_delicious}")
"#;

const BASIC_LOOPS_CODE: &str = r#"
# For loop iterates over a sequence
fruits = ["apple", "banana", "cherry"]

for fruit in fruits:
    print(f"I like {fruit}")

# Range gives you numbers
for i in range(5):
    print(i)  # Prints 0, 1, 2, 3, 4
"#;

const LOOPS_SOLUTION: &str = r#"
for i in range(1, 11):
    print(i)
print("Done!")
"#;

const INTERMEDIATE_LOOPS_CODE: &str = r#"
# Enumerate gives index and value
items = ["a", "b", "c"]
for index, value in enumerate(items):
    print(f"{index}: {value}")

# Zip iterates multiple lists together
names = ["Alice", "Bob"]
scores = [95, 87]
for name, score in zip(names, scores):
    print(f"{name} scored {score}")
"#;

const INTERMEDIATE_LOOPS_SOLUTION: &str = r#"
items = ['apple', 'banana']
prices = [1.50, 0.75]
for item, price in zip(items, prices):
    print(f"{item}: ${price}")
"#;

const FUNCTIONS_CODE: &str = r#"
def greet(name):
    return f"Hello, {name}!"

# Call the function
message = greet("Alice")
print(message)
"#;

const FUNCTIONS_SOLUTION: &str = r#"
def square(n):
    return n ** 2

result = square(5)
print(result)  # 25
"#;

const CLASSES_CODE: &str = r#"
class Dog:
    def __init__(self, name):
        self.name = name

    def bark(self):
        return f"{self.name} says Woof!"

my_dog = Dog("Buddy")
print(my_dog.bark())
"#;

const CLASSES_SOLUTION: &str = r#"
class Rectangle:
    def __init__(self, width, height):
        self.width = width
        self.height = height

    def area(self):
        return self.width * self.height

rect = Rectangle(5, 3)
print(rect.area())  # 15
"#;

const LIST_COMP_CODE: &str = r#"
# Traditional way
squares = []
for x in range(10):
    squares.append(x**2)

# List comprehension - same result, one line!
squares = [x**2 for x in range(10)]

# With condition
even_squares = [x**2 for x in range(10) if x % 2 == 0]
"#;

const LIST_COMP_SOLUTION: &str = "result = [x for x in range(20) if x % 3 == 0]";

const DICT_CODE: &str = r#"
# Dictionary: key -> value mapping
student = {
    "name": "Alice",
    "age": 20,
    "grade": "A"
}

# Access values
print(student["name"])

# Safe access
major = student.get("major", "Undeclared")

# Add/Update
student["major"] = "Computer Science"
"#;

const DICT_SOLUTION: &str = r#"
phone_book = {
    "Alice": "555-0101",
    "Bob": "555-0102",
    "Charlie": "555-0103"
}

name = "Alice"
number = phone_book.get(name, "Not found")
print(f"{name}: {number}")
"#;

const VAR_UNPACK_CODE: &str = r#"
# Multiple assignment
x, y, z = 1, 2, 3

# Swapping
a, b = 10, 20
a, b = b, a  # Now a=20, b=10!

# Extended unpacking
first, *rest = [1, 2, 3, 4, 5]
"#;

const VAR_UNPACK_SOLUTION: &str = r#"
coordinates = (10, 20, 30)
x, y, z = coordinates
print(f"x={x}, y={y}, z={z}")
"#;

const GENERATOR_CODE: &str = r#"
# Generator expression (lazy evaluation)
squares = (x**2 for x in range(1000000))

# Memory efficient - computes one at a time
total = sum(x**2 for x in range(1000000))
"#;

const GENERATOR_SOLUTION: &str = r#"
result = sum(x**2 for x in range(1, 1001))
print(result)
"#;
