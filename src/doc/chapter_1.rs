/*!
# Source Text

## Keywords

Keywords are recognized anywhere outside of strings, just like the C64
editor does. The longest keyword wins, so `PRINT#` is one keyword and
not `PRINT` followed by `#`. The C64 abbreviations work too: the first
letter in lower case followed by the second in upper case. Because the
longest keyword still wins, `pR` is `PRINT#` and `iN` is `INPUT#`.
`GOSUB`, `LEFT$`, `STEP`, `STR$`, `RESTORE`, `RETURN` and `CLOSE`
take two lower case letters and the third in upper case (`goS`, `leF`,
`stE`, `stR`, `reS`, `reT`, `clO`). A `?` is `PRINT`.

With `-t` the TSB keywords are available as well.

## Strings

Strings are in double quotes. Inside a string, control codes are written
in braces.

```text
print "{clr}{2 down}{rvs on}menu{rvs off}"
print "{$93}{147}{%10010011}"
```

A number before the name repeats the code. Numbers may be decimal or hex
with `$` or `0x` or binary with `%` or `0b`. Unknown names become `?`.

A string in single quotes keeps its letters as they were typed. It is
written to the program with double quotes.

## Directives

Lines starting with `#` or `;` are directives. Unknown directives are
comments.

| Directive | Effect |
|-----------|--------|
| `#include "file"` | Compile another file here. Quotes are optional. |
| `#upper`, `#uppercase`, `#cset0` | Strings use the upper case character set. |
| `#lower`, `#lowercase`, `#cset1` | Strings use the lower case character set. |

Included files are looked up by absolute name, then in the working
directory, then next to the including file, then in each `-I` directory.

## Character sets

In the upper case set both cases of a letter in a string become the same
unshifted letter. In the lower case set, `-l` or `#lower`, lower case
letters are unshifted and upper case letters are shifted. Letters outside
of strings are always unshifted.
*/
